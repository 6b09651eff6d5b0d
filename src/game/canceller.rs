/// 非同期処理 (アニメーション・思考) を途中で止めるためのハンドル。
///
/// 中断できない処理には [`Canceller::noop`] を返してよい。`cancel` は何度呼んでも一度しか効かない。
pub struct Canceller {
    cancelled: bool,
    on_cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Canceller {
    pub fn new<F>(on_cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Canceller {
            cancelled: false,
            on_cancel: Some(Box::new(on_cancel)),
        }
    }

    pub fn noop() -> Self {
        Canceller {
            cancelled: false,
            on_cancel: None,
        }
    }

    pub fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        self.cancelled = true;
        if let Some(on_cancel) = self.on_cancel.take() {
            on_cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl std::fmt::Debug for Canceller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canceller")
            .field("cancelled", &self.cancelled)
            .finish()
    }
}
