//! End-to-end tests for the drain -> buffer -> timer -> dispatch pipeline.
//!
//! Uses paused tokio time and a scripted event source, so each test walks
//! the real chain deterministically: drain every page, batch simultaneous
//! countdowns, fire in minimum-countdown order, go idle.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use hibiki_anilist::{AiringSchedule, AnilistError, Media, MediaTitle, PageInfo, SchedulePage};
use hibiki_scheduler::{
    Airing, Dispatcher, EventSource, Scheduler, SchedulerConfig, TimerState,
};

struct ScriptedSource {
    pages: Mutex<VecDeque<Result<SchedulePage, AnilistError>>>,
}

impl ScriptedSource {
    fn new(pages: Vec<Result<SchedulePage, AnilistError>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
        }
    }
}

#[async_trait]
impl EventSource for ScriptedSource {
    async fn fetch_page(
        &self,
        _page: u32,
        _airing_before: i64,
    ) -> Result<SchedulePage, AnilistError> {
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .expect("source queried past the scripted pages")
    }
}

fn entry(media_id: i64, episode: u32, countdown: i64) -> AiringSchedule {
    AiringSchedule {
        episode,
        airing_at: 1_700_000_000 + countdown,
        time_until_airing: countdown,
        media: Media {
            id: media_id,
            site_url: Some(format!("https://anilist.co/anime/{media_id}")),
            status: Some("RELEASING".to_string()),
            title: MediaTitle {
                romaji: Some(format!("Anime {media_id}")),
                ..Default::default()
            },
            cover_image: None,
            external_links: Vec::new(),
        },
    }
}

fn page(current: u32, has_next: bool, entries: Vec<AiringSchedule>) -> SchedulePage {
    SchedulePage {
        page_info: PageInfo {
            current_page: current,
            has_next_page: has_next,
        },
        airing_schedules: entries,
    }
}

type Batches = Arc<Mutex<Vec<Vec<(i64, u32)>>>>;

fn recording_dispatcher(batches: Batches) -> Dispatcher {
    Box::new(move |batch: Vec<Airing>| {
        let batches = Arc::clone(&batches);
        Box::pin(async move {
            let ids: Vec<(i64, u32)> = batch.iter().map(|a| (a.id.media_id, a.episode)).collect();
            batches.lock().unwrap().push(ids);
            Ok(())
        })
    })
}

fn config(drain_interval_secs: u64) -> SchedulerConfig {
    SchedulerConfig {
        drain_interval: Duration::from_secs(drain_interval_secs),
        horizon: Box::new(|| 1_700_086_400),
    }
}

#[tokio::test(start_paused = true)]
async fn full_pipeline_batches_across_pages() {
    // Simultaneous airings are split across two pages; the drain must finish
    // before any timer fires, so they still leave as one batch.
    let source = Arc::new(ScriptedSource::new(vec![
        Ok(page(1, true, vec![entry(1, 12, 5), entry(2, 3, 9)])),
        Ok(page(2, false, vec![entry(3, 1, 5)])),
    ]));

    let batches: Batches = Arc::new(Mutex::new(Vec::new()));
    let scheduler = Scheduler::with_config(
        source,
        recording_dispatcher(Arc::clone(&batches)),
        config(86_400),
    );

    scheduler.run_cycle().await;
    assert_eq!(scheduler.pending().await, 3);

    // t=5: both countdown-5 airings fire together
    sleep(Duration::from_secs(6)).await;
    {
        let recorded = batches.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0], vec![(1, 12), (3, 1)]);
    }

    // The countdown-9 airing re-arms from the previous fire
    sleep(Duration::from_secs(10)).await;
    {
        let recorded = batches.lock().unwrap();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[1], vec![(2, 3)]);
    }

    assert_eq!(scheduler.pending().await, 0);
    assert_eq!(scheduler.timer_state().await, TimerState::Idle);
}

#[tokio::test(start_paused = true)]
async fn new_cycle_merges_into_live_chain() {
    // The second drain lands while the first chain is still armed: the chain
    // is not cancelled, the new airing joins the shared buffer.
    let source = Arc::new(ScriptedSource::new(vec![
        Ok(page(1, false, vec![entry(1, 1, 100)])),
        Ok(page(1, false, vec![entry(1, 1, 70), entry(2, 1, 50)])),
    ]));

    let batches: Batches = Arc::new(Mutex::new(Vec::new()));
    let scheduler = Scheduler::with_config(
        source,
        recording_dispatcher(Arc::clone(&batches)),
        config(86_400),
    );

    scheduler.run_cycle().await;
    assert_eq!(scheduler.pending().await, 1);

    // Second cycle lands 30s in: media 1 deduplicated, media 2 merged
    sleep(Duration::from_secs(30)).await;
    scheduler.run_cycle().await;
    assert_eq!(scheduler.pending().await, 2);
    assert_ne!(scheduler.timer_state().await, TimerState::Idle);

    // The armed timer keeps the first cycle's wake-up (t=100), but the fire
    // re-evaluates the minimum, so the merged airing leaves first.
    sleep(Duration::from_secs(75)).await;
    {
        let recorded = batches.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0], vec![(2, 1)]);
    }

    // The first cycle's airing re-arms with its own countdown
    sleep(Duration::from_secs(105)).await;
    {
        let recorded = batches.lock().unwrap();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[1], vec![(1, 1)]);
    }
    assert_eq!(scheduler.timer_state().await, TimerState::Idle);
}

#[tokio::test(start_paused = true)]
async fn partial_drain_failure_fires_what_it_has() {
    let source = Arc::new(ScriptedSource::new(vec![
        Ok(page(1, true, vec![entry(1, 1, 3), entry(2, 1, 3)])),
        Err(AnilistError::Graphql {
            messages: vec!["Too Many Requests.".to_string()],
        }),
    ]));

    let batches: Batches = Arc::new(Mutex::new(Vec::new()));
    let scheduler = Scheduler::with_config(
        source,
        recording_dispatcher(Arc::clone(&batches)),
        config(86_400),
    );

    scheduler.run_cycle().await;
    assert_eq!(scheduler.pending().await, 2);

    sleep(Duration::from_secs(4)).await;
    {
        let recorded = batches.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0], vec![(1, 1), (2, 1)]);
    }
    assert_eq!(scheduler.timer_state().await, TimerState::Idle);
}

#[tokio::test(start_paused = true)]
async fn already_due_airings_fire_immediately() {
    let source = Arc::new(ScriptedSource::new(vec![Ok(page(
        1,
        false,
        vec![entry(1, 1, 0), entry(2, 1, 600)],
    ))]));

    let batches: Batches = Arc::new(Mutex::new(Vec::new()));
    let scheduler = Scheduler::with_config(
        source,
        recording_dispatcher(Arc::clone(&batches)),
        config(86_400),
    );

    scheduler.run_cycle().await;

    // Zero countdown fires on the next tick, well before the 600s airing
    sleep(Duration::from_millis(1)).await;
    {
        let recorded = batches.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0], vec![(1, 1)]);
    }
    assert_eq!(scheduler.pending().await, 1);
}
