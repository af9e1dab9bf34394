use crate::domain::a003_inbound::InboundEntry;
use serde::{Deserialize, Serialize};

/// Тело `POST /inbound/multi-entry`: все непустые строки сетки одним запросом.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiEntryRequest {
    pub entries: Vec<InboundEntry>,
    pub warehouse_id: i64,
}
