//! 投票填写服务 - 业务能力层
//!
//! 只负责在当前群组页面上把一道题填成投票并发布，不做校验、不记账

use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::config::Config;
use crate::error::UiError;
use crate::infrastructure::{wait_for_element, PageDriver};
use crate::models::PollQuestion;

pub const POLL_BUTTON: &str = "//button[.//span[text()='Poll']]";
pub const QUESTION_LABEL: &str =
    "//*[contains(concat(' ', normalize-space(@class), ' '), ' artdeco-text-input--label ')]";
pub const ADD_OPTION_BUTTON: &str = r#"//button[.//span[text()="Add option"]]"#;
pub const DONE_BUTTON: &str = r#"//button[.//span[text()="Done"]]"#;
pub const POST_BUTTON: &str = r#"//button[.//span[text()="Post"]]"#;

/// 按 id 定位元素
pub fn by_id(id: &str) -> String {
    format!("//*[@id='{}']", id)
}

/// 第 n 个选项输入框（从 1 开始）
pub fn option_input(n: usize) -> String {
    by_id(&format!("poll-option-{}", n))
}

pub struct PollComposer {
    element_timeout: Duration,
    poll_interval: Duration,
    step_settle: Duration,
}

impl PollComposer {
    pub fn new(config: &Config) -> Self {
        Self {
            element_timeout: config.element_timeout(),
            poll_interval: config.element_poll_interval(),
            step_settle: Duration::from_secs(config.step_settle_secs),
        }
    }

    async fn wait<D: PageDriver + ?Sized>(&self, driver: &D, xpath: &str) -> Result<(), UiError> {
        wait_for_element(driver, xpath, self.element_timeout, self.poll_interval).await
    }

    /// 填写并发布一个投票
    ///
    /// 任何一步失败都直接返回错误，由调用方决定中止整个群组
    pub async fn compose<D: PageDriver + ?Sized>(
        &self,
        driver: &D,
        question: &PollQuestion,
    ) -> Result<(), UiError> {
        self.wait(driver, POLL_BUTTON).await?;
        debug!("**** 点击创建投票按钮 ****");
        driver.click(POLL_BUTTON).await?;

        // 题干输入框通过 label 的 for 属性间接定位
        self.wait(driver, QUESTION_LABEL).await?;
        let input_id = driver
            .attribute(QUESTION_LABEL, "for")
            .await?
            .ok_or_else(|| UiError::NotFound {
                locator: format!("{} @for", QUESTION_LABEL),
            })?;
        let question_input = by_id(&input_id);
        self.wait(driver, &question_input).await?;
        driver.type_into(&question_input, &question.text).await?;

        let options = question.display_options();
        for (i, option) in options.iter().enumerate() {
            let input = option_input(i + 1);
            self.wait(driver, &input).await?;

            // 还有后续选项时先多开一个输入框
            if i + 1 < options.len() && driver.exists(ADD_OPTION_BUTTON).await? {
                driver.click(ADD_OPTION_BUTTON).await?;
            }

            driver.type_into(&input, option).await?;
        }

        sleep(self.step_settle).await;
        driver.click(DONE_BUTTON).await?;
        sleep(self.step_settle).await;
        driver.click(POST_BUTTON).await?;

        Ok(())
    }
}
