//! 可执行状态变更通知（CanExecuteChanged）
//!
//! 一个有序的监听者登记表。命令只负责广播“启用状态可能已变化，请重新查询”，
//! 不检测状态本身何时变化。
//!
//! 生命周期约定：
//! - `subscribe` 为强引用登记，订阅方持有返回的 [`SubscriptionId`]，
//!   不再需要时必须调用 `unsubscribe` 释放；
//! - `subscribe_weak` 为弱引用登记，命令不延长订阅方的生命周期，
//!   目标被释放后对应条目会在下一次通知时被清理。
//!
//! 重入语义：`notify` 在开始时对登记表做快照；通知过程中新增的监听者
//! 不会在本轮被调用，本轮中被移除且尚未轮到的监听者会被跳过。
//! 监听者可以在回调中自由访问命令本身。
//!
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

// 句柄在进程内全局分配，不同登记表之间不会混用
static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(0);

/// 状态变更监听者
pub trait CanExecuteListener {
    fn can_execute_changed(&self);
}

impl<F> CanExecuteListener for F
where
    F: Fn(),
{
    fn can_execute_changed(&self) {
        self()
    }
}

/// 订阅句柄：进程内唯一，其它登记表的句柄在本表中视为未知
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

#[derive(Clone)]
enum ListenerRef {
    Strong(Rc<dyn CanExecuteListener>),
    Weak(Weak<dyn CanExecuteListener>),
}

impl ListenerRef {
    fn upgrade(&self) -> Option<Rc<dyn CanExecuteListener>> {
        match self {
            ListenerRef::Strong(l) => Some(l.clone()),
            ListenerRef::Weak(w) => w.upgrade(),
        }
    }

    fn is_alive(&self) -> bool {
        match self {
            ListenerRef::Strong(_) => true,
            ListenerRef::Weak(w) => w.strong_count() > 0,
        }
    }
}

/// 可执行状态变更事件
#[derive(Default)]
pub struct CanExecuteChanged {
    listeners: RefCell<Vec<(SubscriptionId, ListenerRef)>>,
}

impl CanExecuteChanged {
    pub fn new() -> Self {
        Self::default()
    }

    /// 强引用登记
    #[must_use = "keep the id to unsubscribe the listener later"]
    pub fn subscribe<L>(&self, listener: L) -> SubscriptionId
    where
        L: CanExecuteListener + 'static,
    {
        self.insert(ListenerRef::Strong(Rc::new(listener)))
    }

    /// 弱引用登记，不延长 `listener` 的生命周期
    #[must_use = "keep the id to unsubscribe the listener later"]
    pub fn subscribe_weak<L>(&self, listener: &Rc<L>) -> SubscriptionId
    where
        L: CanExecuteListener + 'static,
    {
        let weak: Weak<L> = Rc::downgrade(listener);
        self.insert(ListenerRef::Weak(weak))
    }

    /// 释放订阅；句柄未知或已释放时返回 `false`
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        let removed = listeners.len() != before;
        tracing::debug!(subscription = %id, removed, "unsubscribe can-execute listener");
        removed
    }

    /// 按登记顺序同步调用所有监听者
    pub fn notify(&self) {
        let snapshot = self.listeners.borrow().clone();
        tracing::trace!(listeners = snapshot.len(), "raise can-execute changed");

        let mut pruned = 0usize;
        for (id, listener) in snapshot {
            if !self.contains(id) {
                continue;
            }
            match listener.upgrade() {
                Some(target) => target.can_execute_changed(),
                None => {
                    self.listeners.borrow_mut().retain(|(sid, _)| *sid != id);
                    pruned += 1;
                }
            }
        }

        if pruned > 0 {
            tracing::debug!(pruned, "pruned dropped weak can-execute listeners");
        }
    }

    /// 当前登记的监听者数量（含尚未清理的失效弱引用）
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// 仍然存活的监听者数量
    pub fn live_count(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(_, l)| l.is_alive())
            .count()
    }

    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.listeners.borrow().iter().any(|(sid, _)| *sid == id)
    }

    /// 移除全部监听者
    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }

    fn insert(&self, listener: ListenerRef) -> SubscriptionId {
        let id = SubscriptionId(NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed));
        self.listeners.borrow_mut().push((id, listener));
        tracing::debug!(subscription = %id, "subscribe can-execute listener");
        id
    }
}

impl fmt::Debug for CanExecuteChanged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanExecuteChanged")
            .field("listeners", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn Fn()>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let make = move |name: &'static str| {
            let sink = sink.clone();
            Box::new(move || sink.borrow_mut().push(name)) as Box<dyn Fn()>
        };
        (log, make)
    }

    // 没有监听者时通知为空操作
    #[test]
    fn test_notify_without_listeners() {
        let event = CanExecuteChanged::new();
        event.notify();
        assert!(event.is_empty());
    }

    // 按登记顺序调用
    #[test]
    fn test_notify_in_subscription_order() {
        let (log, make) = recorder();
        let event = CanExecuteChanged::new();
        let _a = event.subscribe(make("a"));
        let _b = event.subscribe(make("b"));
        let _c = event.subscribe(make("c"));

        event.notify();
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    // 取消订阅后不再被调用；重复取消返回 false
    #[test]
    fn test_unsubscribe() {
        let (log, make) = recorder();
        let event = CanExecuteChanged::new();
        let a = event.subscribe(make("a"));
        let _b = event.subscribe(make("b"));

        assert!(event.unsubscribe(a));
        assert!(!event.unsubscribe(a));
        event.notify();
        assert_eq!(*log.borrow(), vec!["b"]);
        assert_eq!(event.len(), 1);
    }

    // 句柄唯一，且不会因为移除而复用
    #[test]
    fn test_subscription_ids_are_unique() {
        let event = CanExecuteChanged::new();
        let a = event.subscribe(|| {});
        assert!(event.unsubscribe(a));
        let b = event.subscribe(|| {});
        assert_ne!(a, b);
        assert!(b.value() > a.value());
        assert_eq!(b.to_string(), format!("sub-{}", b.value()));
    }

    // 其它登记表的句柄在本表中视为未知，不会误删本表的监听者
    #[test]
    fn test_foreign_id_is_unknown() {
        let first = CanExecuteChanged::new();
        let second = CanExecuteChanged::new();
        let calls = Rc::new(Cell::new(0));

        let foreign = first.subscribe(|| {});
        let c = calls.clone();
        let own = second.subscribe(move || c.set(c.get() + 1));

        assert_ne!(foreign, own);
        assert!(!second.unsubscribe(foreign));
        assert!(!second.contains(foreign));
        second.notify();
        assert_eq!(calls.get(), 1);
        assert!(first.contains(foreign));
    }

    // 弱引用登记：目标释放后不再调用，并在通知时清理
    #[test]
    fn test_weak_listener_is_pruned() {
        struct Counter(Cell<usize>);
        impl CanExecuteListener for Counter {
            fn can_execute_changed(&self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let event = CanExecuteChanged::new();
        let counter = Rc::new(Counter(Cell::new(0)));
        let id = event.subscribe_weak(&counter);

        event.notify();
        assert_eq!(counter.0.get(), 1);
        assert_eq!(Rc::strong_count(&counter), 1);

        drop(counter);
        assert_eq!(event.len(), 1);
        assert_eq!(event.live_count(), 0);

        event.notify();
        assert!(event.is_empty());
        assert!(!event.contains(id));
    }

    // 通知过程中新增的监听者不在本轮调用
    #[test]
    fn test_subscribe_during_notify_is_deferred() {
        let event = Rc::new(CanExecuteChanged::new());
        let late_calls = Rc::new(Cell::new(0));

        let weak_event = Rc::downgrade(&event);
        let late = late_calls.clone();
        let _id = event.subscribe(move || {
            if let Some(event) = weak_event.upgrade() {
                let late = late.clone();
                let _ = event.subscribe(move || late.set(late.get() + 1));
            }
        });

        event.notify();
        assert_eq!(late_calls.get(), 0);
        assert_eq!(event.len(), 2);

        event.notify();
        assert_eq!(late_calls.get(), 1);
    }

    // 通知过程中被移除且尚未轮到的监听者被跳过
    #[test]
    fn test_unsubscribe_during_notify_skips_pending() {
        let (log, make) = recorder();
        let event = Rc::new(CanExecuteChanged::new());
        let victim: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));

        let weak_event = Rc::downgrade(&event);
        let target = victim.clone();
        let _first = event.subscribe(move || {
            if let (Some(event), Some(id)) = (weak_event.upgrade(), target.get()) {
                event.unsubscribe(id);
            }
        });
        let second = event.subscribe(make("second"));
        victim.set(Some(second));

        event.notify();
        assert!(log.borrow().is_empty());
        assert_eq!(event.len(), 1);
    }

    // clear 移除全部监听者
    #[test]
    fn test_clear() {
        let event = CanExecuteChanged::new();
        let _a = event.subscribe(|| {});
        let _b = event.subscribe(|| {});
        event.clear();
        assert!(event.is_empty());
        assert_eq!(format!("{event:?}"), "CanExecuteChanged { listeners: 0 }");
    }
}
