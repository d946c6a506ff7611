//! 手势事件分发
//!
//! 订阅返回一个 `Subscription` 句柄，句柄被丢弃时（包括 `?` 提前返回和 panic 展开）
//! 自动注销处理函数，不依赖任何界面组件的生命周期。

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use protocol::GestureEvent;

type Handler = Box<dyn FnMut(&GestureEvent)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
    /// 分发期间注销的订阅
    removed: Vec<u64>,
    /// 分发期间发出的事件，按顺序排队
    pending: VecDeque<GestureEvent>,
    dispatching: bool,
}

/// 手势中心：单线程，事件逐个送达
#[derive(Default)]
pub struct GestureHub {
    registry: Rc<RefCell<Registry>>,
}

impl GestureHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册处理函数
    #[must_use = "dropping the subscription unregisters the handler"]
    pub fn subscribe(&self, handler: impl FnMut(&GestureEvent) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.handlers.push((id, Box::new(handler)));

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// 按注册顺序把事件送达所有处理函数
    ///
    /// 处理函数内部再次发出的事件会排在当前事件之后送达。
    pub fn emit(&self, event: GestureEvent) {
        {
            let mut registry = self.registry.borrow_mut();
            registry.pending.push_back(event);
            if registry.dispatching {
                return;
            }
            registry.dispatching = true;
        }

        loop {
            let (event, handlers) = {
                let mut registry = self.registry.borrow_mut();
                let Some(event) = registry.pending.pop_front() else {
                    registry.dispatching = false;
                    break;
                };
                (event, std::mem::take(&mut registry.handlers))
            };

            // 分发期间不持有借用，处理函数可以自由订阅或注销
            let mut dispatch = Dispatch {
                registry: &self.registry,
                handlers,
            };
            for (_, handler) in dispatch.handlers.iter_mut() {
                handler(&event);
            }
        }
    }

    /// 当前订阅数
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }
}

/// 一轮分发中取出的处理函数，结束时（包括 panic 展开）放回注册表
struct Dispatch<'a> {
    registry: &'a RefCell<Registry>,
    handlers: Vec<(u64, Handler)>,
}

impl Drop for Dispatch<'_> {
    fn drop(&mut self) {
        let mut registry = self.registry.borrow_mut();
        let removed = std::mem::take(&mut registry.removed);
        let mut handlers = std::mem::take(&mut self.handlers);
        handlers.retain(|(id, _)| !removed.contains(id));
        let added = std::mem::replace(&mut registry.handlers, handlers);
        registry.handlers.extend(added);

        // 处理函数 panic：丢弃排队的事件，下一次 emit 重新开始分发
        if std::thread::panicking() {
            registry.dispatching = false;
            registry.pending.clear();
        }
    }
}

/// 订阅句柄
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.borrow_mut();

        let before = registry.handlers.len();
        let id = self.id;
        registry.handlers.retain(|(handler_id, _)| *handler_id != id);

        // 处理函数正在分发中，等分发结束后再移除
        if registry.handlers.len() == before && registry.dispatching {
            registry.removed.push(id);
        }
    }
}
