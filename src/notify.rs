use std::sync::Mutex;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Error,
}

impl ToastVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastVariant::Success => "SUCCESS",
            ToastVariant::Error => "ERROR",
        }
    }
}

/// How a toast leaves the screen. Every toast expires on its own and can be cleared early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissMode {
    Dismissable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub variant: ToastVariant,
    pub mode: DismissMode,
}

impl Toast {
    pub fn success(title: &str, message: String) -> Self {
        Self {
            title: title.to_string(),
            message,
            variant: ToastVariant::Success,
            mode: DismissMode::Dismissable,
        }
    }

    pub fn error(title: &str, message: String) -> Self {
        Self {
            title: title.to_string(),
            message,
            variant: ToastVariant::Error,
            mode: DismissMode::Dismissable,
        }
    }
}

/// Fire-and-forget notification port.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Forwards toasts to whoever renders them.
#[derive(Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Toast>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Toast>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, toast: Toast) {
        if self.tx.send(toast).is_err() {
            tracing::debug!("toast dropped: renderer gone");
        }
    }
}

/// Keeps every toast in memory.
#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_notifier_forwards() {
        let (notifier, mut rx) = ChannelNotifier::new();
        notifier.notify(Toast::success("Success", "done".to_string()));
        let toast = rx.recv().await.unwrap();
        assert_eq!(toast.variant, ToastVariant::Success);
        assert_eq!(toast.mode, DismissMode::Dismissable);
        assert_eq!(toast.message, "done");
    }

    #[test]
    fn test_channel_notifier_without_receiver() {
        let (notifier, rx) = ChannelNotifier::new();
        drop(rx);
        notifier.notify(Toast::error("Error", "lost".to_string()));
    }

    #[test]
    fn test_recording_notifier_keeps_order() {
        let rec = RecordingNotifier::new();
        rec.notify(Toast::success("a", "1".to_string()));
        rec.notify(Toast::error("b", "2".to_string()));
        let titles: Vec<_> = rec.toasts().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }
}
