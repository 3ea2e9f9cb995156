//! 订单状态广播注册表
//!
//! # 架构
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 StatusBroadcaster                    │
//! │  ┌───────────────────────────────────────────────┐  │
//! │  │  DashMap<booking id, Vec<mpsc::Sender>>       │  │
//! │  └───────────────────────────────────────────────┘  │
//! └──────────────────────────┬──────────────────────────┘
//!                           │
//!          subscribe ───────┤─────── publish
//!          (SSE handler)    │        (status advance)
//! ```
//!
//! 进程级单例：服务启动时构造一次，经 ServerState 注入订阅端与
//! 状态推进端，关停时统一关闭。单进程内 best-effort / at-most-once
//! 投递 —— 掉线的客户端错过的事件由重新订阅时的 INITIAL 帧补齐。
//! 多实例部署下注册表不会跨实例扇出（需要消息总线时另行扩展）。

use dashmap::DashMap;
use shared::booking::StreamEvent;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Registry mapping booking id → open subscriber channels
#[derive(Debug)]
pub struct StatusBroadcaster {
    /// 每个 booking id 对应一组打开的输出通道
    streams: DashMap<String, Vec<mpsc::Sender<StreamEvent>>>,
    /// 单个订阅通道的缓冲容量
    channel_capacity: usize,
    /// 关闭信号令牌
    shutdown_token: CancellationToken,
}

impl StatusBroadcaster {
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            streams: DashMap::new(),
            channel_capacity: channel_capacity.max(1),
            shutdown_token: CancellationToken::new(),
        }
    }

    /// 订阅一个 booking 的状态流
    ///
    /// 返回接收端；发送端登记进注册表。订阅后的第一帧 (INITIAL)
    /// 由 SSE handler 负责发出。
    pub fn subscribe(&self, booking_id: &str) -> mpsc::Receiver<StreamEvent> {
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        self.streams
            .entry(booking_id.to_string())
            .or_default()
            .push(tx);
        tracing::debug!(booking_id, "Status stream registered");
        rx
    }

    /// 推送事件到该 booking 的所有订阅者
    ///
    /// 写失败（对端已断开或缓冲已满）只会注销该条流，绝不影响
    /// 调用方；集合清空时移除整个条目。
    pub fn publish(&self, booking_id: &str, event: &StreamEvent) {
        let mut remove_entry = false;

        if let Some(mut entry) = self.streams.get_mut(booking_id) {
            entry.retain(|tx| match tx.try_send(event.clone()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!(booking_id, "Status stream lagging, dropping subscriber");
                    false
                }
                Err(mpsc::error::TrySendError::Closed(_)) => false,
            });
            remove_entry = entry.is_empty();
        }

        if remove_entry {
            self.streams
                .remove_if(booking_id, |_, senders| senders.is_empty());
        }
    }

    /// 客户端断开时反注册（清理已关闭的通道）
    pub fn unsubscribe_closed(&self, booking_id: &str) {
        let mut remove_entry = false;
        if let Some(mut entry) = self.streams.get_mut(booking_id) {
            entry.retain(|tx| !tx.is_closed());
            remove_entry = entry.is_empty();
        }
        if remove_entry {
            self.streams
                .remove_if(booking_id, |_, senders| senders.is_empty());
        }
    }

    /// 当前订阅者数量（测试与诊断用）
    pub fn subscriber_count(&self, booking_id: &str) -> usize {
        self.streams
            .get(booking_id)
            .map(|entry| entry.len())
            .unwrap_or(0)
    }

    /// 获取关闭令牌（SSE handler 监听以便提前结束流）
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// 优雅关闭：丢弃所有发送端，令打开的流全部结束
    pub fn shutdown(&self) {
        tracing::info!("Shutting down status broadcaster");
        self.shutdown_token.cancel();
        self.streams.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::booking::{OrderStatus, ServiceGroup, tracking_steps};

    fn update(status: OrderStatus) -> StreamEvent {
        StreamEvent::StatusUpdate {
            order_status: status,
            tracking_steps: tracking_steps(ServiceGroup::DineIn, status),
            updated_at: "2026-08-07T12:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn delivers_to_all_subscribers_of_a_booking() {
        let broadcaster = StatusBroadcaster::new(8);
        let mut rx1 = broadcaster.subscribe("booking:a");
        let mut rx2 = broadcaster.subscribe("booking:a");
        let mut other = broadcaster.subscribe("booking:b");

        broadcaster.publish("booking:a", &update(OrderStatus::Preparing));

        assert!(rx1.recv().await.is_some());
        assert!(rx2.recv().await.is_some());
        assert!(other.try_recv().is_err());
    }

    #[tokio::test]
    async fn dropped_receiver_is_deregistered_on_next_publish() {
        let broadcaster = StatusBroadcaster::new(8);
        let rx = broadcaster.subscribe("booking:a");
        assert_eq!(broadcaster.subscriber_count("booking:a"), 1);

        drop(rx);
        broadcaster.publish("booking:a", &update(OrderStatus::Preparing));
        assert_eq!(broadcaster.subscriber_count("booking:a"), 0);

        // Entry is removed entirely once the set empties.
        broadcaster.publish("booking:a", &update(OrderStatus::Served));
        assert_eq!(broadcaster.subscriber_count("booking:a"), 0);
    }

    #[tokio::test]
    async fn shutdown_closes_open_streams() {
        let broadcaster = StatusBroadcaster::new(8);
        let mut rx = broadcaster.subscribe("booking:a");

        broadcaster.shutdown();

        assert!(broadcaster.shutdown_token().is_cancelled());
        // Senders are gone; the receiver observes end-of-stream.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_no_op() {
        let broadcaster = StatusBroadcaster::new(8);
        broadcaster.publish("booking:nobody", &update(OrderStatus::Preparing));
        assert_eq!(broadcaster.subscriber_count("booking:nobody"), 0);
    }
}
