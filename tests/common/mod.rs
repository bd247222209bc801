#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use group_poll_submit::services::poll_composer::{
    by_id, option_input, ADD_OPTION_BUTTON, DONE_BUTTON, POLL_BUTTON, POST_BUTTON, QUESTION_LABEL,
};
use group_poll_submit::services::{ConnectivityGuard, ReachabilityProbe};
use group_poll_submit::{PageDriver, PollQuestion, QuestionBlock, StoredCookie, UiError};

/// 题干输入框的 id（由 label 的 for 属性给出）
pub const QUESTION_INPUT_ID: &str = "poll-question-input";

/// 模拟的无限滚动列表页
#[derive(Debug, Clone, Default)]
pub struct FakeListing {
    /// 第 k 次滚动后的页面高度（超出部分取最后一个）
    pub heights: Vec<i64>,
    /// 第 k 次滚动后页面上可见的链接
    pub href_batches: Vec<Vec<String>>,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub url: String,
    pub url_after_reload: Option<String>,
    pub visits: Vec<String>,
    pub present: HashSet<String>,
    pub attributes: HashMap<(String, String), String>,
    pub failing_clicks: HashSet<String>,
    /// 剩余可成功点击次数，用完后点击失败
    pub click_budget: HashMap<String, usize>,
    pub clicks: Vec<String>,
    pub typed: Vec<(String, String)>,
    pub listings: HashMap<String, FakeListing>,
    pub scrolls: usize,
    pub total_scrolls: usize,
    pub cookies: Vec<StoredCookie>,
}

/// 内存中的页面驱动
#[derive(Default)]
pub struct FakePage {
    pub state: Mutex<FakeState>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_present(self, xpaths: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for x in xpaths {
                state.present.insert(x.to_string());
            }
        }
        self
    }

    pub fn set_present(&self, xpath: &str, present: bool) {
        let mut state = self.state.lock().unwrap();
        if present {
            state.present.insert(xpath.to_string());
        } else {
            state.present.remove(xpath);
        }
    }

    pub fn set_attribute(&self, xpath: &str, name: &str, value: &str) {
        self.state
            .lock()
            .unwrap()
            .attributes
            .insert((xpath.to_string(), name.to_string()), value.to_string());
    }

    pub fn fail_click(&self, xpath: &str) {
        self.state.lock().unwrap().failing_clicks.insert(xpath.to_string());
    }

    /// 前 `successes` 次点击成功，之后全部失败
    pub fn fail_click_after(&self, xpath: &str, successes: usize) {
        self.state
            .lock()
            .unwrap()
            .click_budget
            .insert(xpath.to_string(), successes);
    }

    pub fn add_listing(&self, url: &str, listing: FakeListing) {
        self.state.lock().unwrap().listings.insert(url.to_string(), listing);
    }

    pub fn clicks(&self) -> Vec<String> {
        self.state.lock().unwrap().clicks.clone()
    }

    pub fn typed(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().typed.clone()
    }

    pub fn visits(&self) -> Vec<String> {
        self.state.lock().unwrap().visits.clone()
    }

    pub fn total_scrolls(&self) -> usize {
        self.state.lock().unwrap().total_scrolls
    }
}

fn pick<T: Clone + Default>(items: &[T], index: usize) -> T {
    items
        .get(index)
        .or_else(|| items.last())
        .cloned()
        .unwrap_or_default()
}

#[async_trait]
impl PageDriver for FakePage {
    async fn goto(&self, url: &str) -> Result<(), UiError> {
        let mut state = self.state.lock().unwrap();
        state.url = url.to_string();
        state.visits.push(url.to_string());
        state.scrolls = 0;
        Ok(())
    }

    async fn current_url(&self) -> Result<String, UiError> {
        Ok(self.state.lock().unwrap().url.clone())
    }

    async fn reload(&self) -> Result<(), UiError> {
        let mut state = self.state.lock().unwrap();
        if let Some(url) = state.url_after_reload.clone() {
            state.url = url;
        }
        Ok(())
    }

    async fn exists(&self, xpath: &str) -> Result<bool, UiError> {
        Ok(self.state.lock().unwrap().present.contains(xpath))
    }

    async fn click(&self, xpath: &str) -> Result<(), UiError> {
        let mut state = self.state.lock().unwrap();
        if state.failing_clicks.contains(xpath) {
            return Err(UiError::Protocol(format!("click intercepted: {}", xpath)));
        }
        if !state.present.contains(xpath) {
            return Err(UiError::NotFound {
                locator: xpath.to_string(),
            });
        }
        if let Some(left) = state.click_budget.get_mut(xpath) {
            if *left == 0 {
                return Err(UiError::Protocol(format!("click intercepted: {}", xpath)));
            }
            *left -= 1;
        }
        state.clicks.push(xpath.to_string());
        Ok(())
    }

    async fn type_into(&self, xpath: &str, text: &str) -> Result<(), UiError> {
        let mut state = self.state.lock().unwrap();
        if !state.present.contains(xpath) {
            return Err(UiError::NotFound {
                locator: xpath.to_string(),
            });
        }
        state.typed.push((xpath.to_string(), text.to_string()));
        Ok(())
    }

    async fn attribute(&self, xpath: &str, name: &str) -> Result<Option<String>, UiError> {
        let state = self.state.lock().unwrap();
        if !state.present.contains(xpath) {
            return Err(UiError::NotFound {
                locator: xpath.to_string(),
            });
        }
        Ok(state
            .attributes
            .get(&(xpath.to_string(), name.to_string()))
            .cloned())
    }

    async fn collect_hrefs(&self, _xpath: &str) -> Result<Vec<String>, UiError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .listings
            .get(&state.url)
            .map(|l| pick(&l.href_batches, state.scrolls))
            .unwrap_or_default())
    }

    async fn scroll_height(&self) -> Result<i64, UiError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .listings
            .get(&state.url)
            .map(|l| pick(&l.heights, state.scrolls))
            .unwrap_or_default())
    }

    async fn scroll_to_bottom(&self) -> Result<(), UiError> {
        let mut state = self.state.lock().unwrap();
        state.scrolls += 1;
        state.total_scrolls += 1;
        Ok(())
    }

    async fn cookies(&self) -> Result<Vec<StoredCookie>, UiError> {
        Ok(self.state.lock().unwrap().cookies.clone())
    }

    async fn set_cookies(&self, cookies: Vec<StoredCookie>) -> Result<(), UiError> {
        self.state.lock().unwrap().cookies.extend(cookies);
        Ok(())
    }
}

pub struct AlwaysOnline;

#[async_trait]
impl ReachabilityProbe for AlwaysOnline {
    async fn is_reachable(&self) -> bool {
        true
    }
}

pub fn online_guard() -> ConnectivityGuard {
    ConnectivityGuard::with_probe(Box::new(AlwaysOnline), Duration::from_secs(5))
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn cookie(name: &str, value: &str) -> StoredCookie {
    StoredCookie {
        name: name.to_string(),
        value: value.to_string(),
        domain: ".linkedin.com".to_string(),
        path: "/".to_string(),
        secure: true,
        http_only: false,
    }
}

/// 所有投票控件都就绪的群组页面
pub fn composer_page() -> FakePage {
    let page = FakePage::new().with_present(&[
        POLL_BUTTON,
        QUESTION_LABEL,
        ADD_OPTION_BUTTON,
        DONE_BUTTON,
        POST_BUTTON,
    ]);
    page.set_present(&by_id(QUESTION_INPUT_ID), true);
    for n in 1..=4 {
        page.set_present(&option_input(n), true);
    }
    page.set_attribute(QUESTION_LABEL, "for", QUESTION_INPUT_ID);
    page
}

pub fn question(lines: &[&str]) -> PollQuestion {
    PollQuestion::from_block(&QuestionBlock {
        question_line: lines[0].to_string(),
        option_lines: lines[1..].iter().map(|s| s.to_string()).collect(),
    })
    .unwrap()
}
