// Page service - Page views and progressive page streaming
use crate::application::router::PageRouter;
use crate::application::view_update::{UpdateError, ViewUpdateEngine};
use crate::domain::chart::{ChartSpec, SlotUpdate};
use crate::domain::page::{ControlValues, Navbar, PageContent, PageId, SlotId, APP_TITLE};
use serde::Serialize;
use std::time::Instant;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Pending,
    Computed,
    NotYetComputed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotState {
    pub slot: SlotId,
    pub status: SlotStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub figure: Option<ChartSpec>,
}

impl SlotState {
    pub fn new(slot: SlotId, update: SlotUpdate) -> Self {
        match update {
            SlotUpdate::Computed(spec) => Self {
                slot,
                status: SlotStatus::Computed,
                figure: Some(spec),
            },
            SlotUpdate::NotYetComputed => Self {
                slot,
                status: SlotStatus::NotYetComputed,
                figure: None,
            },
        }
    }

    pub fn pending(slot: SlotId) -> Self {
        Self {
            slot,
            status: SlotStatus::Pending,
            figure: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub page: PageId,
    pub pathname: String,
    pub title: String,
    pub navbar: Navbar,
    pub content: PageContent,
    pub slots: Vec<SlotState>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageMessage {
    Skeleton { view: PageView },
    SlotUpdate { state: SlotState },
    Complete { slots: usize, duration_ms: u64 },
}

#[derive(Clone)]
pub struct PageService {
    router: PageRouter,
    engine: ViewUpdateEngine,
}

impl PageService {
    pub fn new(router: PageRouter, engine: ViewUpdateEngine) -> Self {
        Self { router, engine }
    }

    /// Full page for `path`, with every slot evaluated against the page's
    /// initial control values.
    pub fn render(&self, path: &str) -> Result<PageView, UpdateError> {
        let page = self.router.resolve(path);
        let values = ControlValues::initial(&page.controls());

        let slots = page
            .slots()
            .iter()
            .map(|slot| {
                self.engine
                    .compute(*slot, &values)
                    .map(|update| SlotState::new(*slot, update))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.view(path, page, slots))
    }

    /// Progressive variant of [`render`](Self::render): a skeleton with
    /// pending slots, one update per slot as it is computed, then a
    /// completion event once every slot task has finished.
    pub fn stream(&self, path: &str) -> mpsc::Receiver<PageMessage> {
        let (tx, rx) = mpsc::channel(16);
        let start_time = Instant::now();

        let page = self.router.resolve(path);
        let skeleton = self.view(
            path,
            page,
            page.slots().iter().map(|s| SlotState::pending(*s)).collect(),
        );
        let engine = self.engine.clone();

        tokio::spawn(async move {
            if tx.send(PageMessage::Skeleton { view: skeleton }).await.is_err() {
                return;
            }

            let values = ControlValues::initial(&page.controls());
            let sent = stream_slots(&engine, page.slots(), &values, &tx).await;

            let duration_ms = start_time.elapsed().as_millis() as u64;
            let _ = tx
                .send(PageMessage::Complete {
                    slots: sent,
                    duration_ms,
                })
                .await;
        });

        rx
    }

    fn view(&self, path: &str, page: PageId, slots: Vec<SlotState>) -> PageView {
        PageView {
            page,
            pathname: path.to_string(),
            title: APP_TITLE.to_string(),
            navbar: Navbar::new(self.router.enabled(), page),
            content: PageContent::for_page(page),
            slots,
        }
    }
}

/// Compute every slot on its own task and forward each result as it lands.
/// Returns how many slot updates were actually sent; slots whose rule fails
/// are logged and left out.
async fn stream_slots(
    engine: &ViewUpdateEngine,
    slots: &[SlotId],
    values: &ControlValues,
    tx: &mpsc::Sender<PageMessage>,
) -> usize {
    let mut tasks = Vec::new();

    for slot in slots {
        let tx = tx.clone();
        let engine = engine.clone();
        let values = values.clone();
        let slot = *slot;

        tasks.push(tokio::spawn(async move {
            let update = match engine.compute(slot, &values) {
                Ok(update) => update,
                Err(e) => {
                    tracing::warn!(?slot, error = %e, "Skipping slot in page stream");
                    return false;
                }
            };

            let state = SlotState::new(slot, update);
            if let Some(figure) = &state.figure {
                tracing::debug!(?slot, rows = figure.data.len(), "Streaming slot");
            }
            tx.send(PageMessage::SlotUpdate { state }).await.is_ok()
        }));
    }

    let mut sent = 0;
    for task in tasks {
        match task.await {
            Ok(true) => sent += 1,
            Ok(false) => {}
            Err(e) => tracing::error!(error = %e, "Slot task failed"),
        }
    }
    sent
}
