mod common;

use common::{online_guard, strings, FakeListing, FakePage};
use group_poll_submit::services::group_discovery::LOAD_MORE_BUTTON;
use group_poll_submit::services::{GroupDiscovery, GroupSource};
use group_poll_submit::Config;

const LISTING: &str = "https://www.linkedin.com/groups/followed";

fn source() -> GroupSource {
    GroupSource::joined(&Config::default())
}

fn growing_listing() -> FakeListing {
    FakeListing {
        heights: vec![100, 200, 300, 300],
        href_batches: vec![
            strings(&["a", "b"]),
            strings(&["a", "b", "c"]),
            strings(&["b", "c", "d"]),
            strings(&["d", "e"]),
        ],
    }
}

#[tokio::test(start_paused = true)]
async fn stops_when_height_stops_growing() {
    let page = FakePage::new();
    page.add_listing(LISTING, growing_listing());
    let discovery = GroupDiscovery::new(&Config::default());

    let harvest = discovery
        .harvest(&page, &online_guard(), &source())
        .await
        .unwrap();

    // 高度增长 2 次，第 3 轮结束
    assert_eq!(harvest.rounds, 3);
    assert_eq!(page.total_scrolls(), 3);
    assert_eq!(harvest.urls, strings(&["a", "b", "c", "d"]));
}

#[tokio::test(start_paused = true)]
async fn flat_page_ends_after_one_round() {
    let page = FakePage::new();
    page.add_listing(
        LISTING,
        FakeListing {
            heights: vec![500],
            href_batches: vec![strings(&["x", "x", "y"])],
        },
    );
    let discovery = GroupDiscovery::new(&Config::default());

    let harvest = discovery
        .harvest(&page, &online_guard(), &source())
        .await
        .unwrap();

    assert_eq!(harvest.rounds, 1);
    assert_eq!(harvest.urls, strings(&["x", "y"]));
}

#[tokio::test(start_paused = true)]
async fn clicks_load_more_when_present() {
    let page = FakePage::new().with_present(&[LOAD_MORE_BUTTON]);
    page.add_listing(LISTING, growing_listing());
    let discovery = GroupDiscovery::new(&Config::default());

    let harvest = discovery
        .harvest(&page, &online_guard(), &source())
        .await
        .unwrap();

    let load_more_clicks = page.clicks().iter().filter(|c| *c == LOAD_MORE_BUTTON).count();
    assert_eq!(load_more_clicks, harvest.rounds);
}

#[tokio::test(start_paused = true)]
async fn failed_load_more_click_is_not_fatal() {
    let page = FakePage::new().with_present(&[LOAD_MORE_BUTTON]);
    page.fail_click(LOAD_MORE_BUTTON);
    page.add_listing(LISTING, growing_listing());
    let discovery = GroupDiscovery::new(&Config::default());

    let harvest = discovery
        .harvest(&page, &online_guard(), &source())
        .await
        .unwrap();

    assert_eq!(harvest.urls.len(), 4);
}

#[tokio::test(start_paused = true)]
async fn round_cap_stops_endless_page() {
    let page = FakePage::new();
    page.add_listing(
        LISTING,
        FakeListing {
            heights: (1..=50).collect(),
            href_batches: vec![strings(&["a"])],
        },
    );
    let config = Config {
        max_scroll_rounds: 3,
        ..Config::default()
    };
    let discovery = GroupDiscovery::new(&config);

    let harvest = discovery
        .harvest(&page, &online_guard(), &source())
        .await
        .unwrap();

    assert_eq!(harvest.rounds, 3);
}

#[tokio::test(start_paused = true)]
async fn discover_all_puts_joined_first_and_drops_bad_urls() {
    let config = Config::default();
    let page = FakePage::new();
    page.add_listing(
        &config.joined_groups_url,
        FakeListing {
            heights: vec![10],
            href_batches: vec![strings(&[
                "https://www.linkedin.com/groups/2/",
                "https://www.linkedin.com/groups/1/",
            ])],
        },
    );
    page.add_listing(
        &config.suggested_groups_url,
        FakeListing {
            heights: vec![10],
            href_batches: vec![strings(&[
                "https://www.linkedin.com/groups/1/",
                "https://www.linkedin.com/groups/not-a-number/",
                "https://www.linkedin.com/groups/3",
            ])],
        },
    );
    let discovery = GroupDiscovery::new(&config);

    let groups = discovery.discover_all(&page, &online_guard()).await.unwrap();

    let ids: Vec<u64> = groups.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![2, 1, 3]);
    assert_eq!(
        page.visits(),
        vec![config.joined_groups_url.clone(), config.suggested_groups_url.clone()]
    );
}
