//! # WatchedValue —— 可监听的最新值容器
//!
//! 基于 [`tokio::sync::watch`]：写端覆盖式广播最新值，任意多个监听端
//! 通过 [`ValueWatcher::changed`] 异步等待变化。
//!
//! 进度属于高频覆盖式更新，监听端只关心最新值；交付是尽力而为的，
//! 没有监听端时更新照常成功，中间值允许被后来的值覆盖。

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

/// 监听失败的统一错误。
#[derive(Debug, Error)]
pub enum WatchedValueError {
    /// 写端已全部销毁，后续不会再有新值
    #[error("值的写端已销毁")]
    SenderClosed,
}

/// 可监听的最新值容器；Clone 后共享同一份底层状态。
#[derive(Debug, Clone)]
pub struct WatchedValue<T: Clone + Send + Sync> {
    sender: Arc<watch::Sender<T>>,
    receiver: watch::Receiver<T>,
}

impl<T> WatchedValue<T>
where
    T: Clone + Send + Sync,
{
    /// 用初始值创建。
    pub fn new(value: T) -> Self {
        let (sender, receiver) = watch::channel(value);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// 覆盖为新值并通知所有监听者；没有监听者时值也会被保留。
    pub fn update(&self, new_value: T) {
        let _ = self.sender.send_replace(new_value);
    }

    /// 当前值的快照（clone 一次）。
    pub fn get_current(&self) -> T {
        self.receiver.borrow().clone()
    }

    /// 创建一个监听器，用于异步等待值的变化。
    pub fn watch(&self) -> ValueWatcher<T> {
        ValueWatcher {
            receiver: self.sender.subscribe(),
        }
    }
}

/// 值监听器：`changed().await` 返回变化后的最新值。
pub struct ValueWatcher<T> {
    receiver: watch::Receiver<T>,
}

impl<T> ValueWatcher<T>
where
    T: Clone + Send + Sync,
{
    /// 异步等待值变化，返回变化后的最新值。
    pub async fn changed(&mut self) -> Result<T, WatchedValueError> {
        self.receiver
            .changed()
            .await
            .map_err(|_| WatchedValueError::SenderClosed)?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    /// 同步取当前值的克隆。
    pub fn borrow(&self) -> T {
        self.receiver.borrow().clone()
    }
}
