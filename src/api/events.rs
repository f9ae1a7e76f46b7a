use serde::{Deserialize, Serialize};

use crate::core::{ResultRecord, ViewDimensions};
use crate::error::{ChartError, ChartResult};

/// Notifications raised by chart instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    /// The host activated a data item; `series` names the line it belongs to.
    Activated {
        series: Option<String>,
        record: ResultRecord,
    },
    LayoutResolved { dimensions: ViewDimensions },
}

/// Observer hook for chart events.
///
/// Listeners see events after the chart state they describe is in place and
/// cannot mutate the chart from inside the callback.
pub trait ChartEventListener {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &ChartEvent);
}

/// Ordered listener set with unique ids.
#[derive(Default)]
pub(super) struct ListenerRegistry {
    listeners: Vec<Box<dyn ChartEventListener + Send>>,
}

impl ListenerRegistry {
    pub(super) fn add(&mut self, listener: Box<dyn ChartEventListener + Send>) -> ChartResult<()> {
        let listener_id = listener.id().to_owned();
        if listener_id.is_empty() {
            return Err(ChartError::InvalidData(
                "listener id must not be empty".to_owned(),
            ));
        }
        if self.listeners.iter().any(|entry| entry.id() == listener_id) {
            return Err(ChartError::InvalidData(format!(
                "listener with id `{listener_id}` is already registered"
            )));
        }
        self.listeners.push(listener);
        Ok(())
    }

    pub(super) fn remove(&mut self, listener_id: &str) -> bool {
        if let Some(position) = self
            .listeners
            .iter()
            .position(|entry| entry.id() == listener_id)
        {
            self.listeners.remove(position);
            return true;
        }
        false
    }

    pub(super) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(super) fn emit(&mut self, event: &ChartEvent) {
        for listener in &mut self.listeners {
            listener.on_event(event);
        }
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.listeners.iter().map(|listener| listener.id()))
            .finish()
    }
}
