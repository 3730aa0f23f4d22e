//! 主题服务 - 业务能力层
//!
//! 只提供一个深色/浅色标志，初始值来自宿主的配色偏好，
//! 之后跟随宿主的变化通知，同时允许手动切换

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// 主题提供者
pub struct ThemeProvider {
    dark: watch::Sender<bool>,
}

impl ThemeProvider {
    /// 用宿主当前的配色偏好创建
    pub fn new(system_prefers_dark: bool) -> Self {
        let (dark, _) = watch::channel(system_prefers_dark);
        Self { dark }
    }

    pub fn is_dark(&self) -> bool {
        *self.dark.borrow()
    }

    /// 手动切换，返回切换后的值
    pub fn toggle(&self) -> bool {
        let mut now = false;
        self.dark.send_modify(|dark| {
            *dark = !*dark;
            now = *dark;
        });
        debug!("手动切换主题: dark={}", now);
        now
    }

    pub fn set_dark(&self, dark: bool) {
        self.dark.send_replace(dark);
    }

    /// 订阅主题变化（渲染层使用）
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.dark.subscribe()
    }

    /// 跟随宿主的配色偏好变化
    ///
    /// 返回的任务在宿主通道关闭时结束；组件卸载时 abort 即可取消订阅
    pub fn follow_system(&self, mut system: watch::Receiver<bool>) -> JoinHandle<()> {
        let dark = self.dark.clone();
        tokio::spawn(async move {
            while system.changed().await.is_ok() {
                let prefers_dark = *system.borrow_and_update();
                debug!("宿主配色偏好变化: dark={}", prefers_dark);
                dark.send_replace(prefers_dark);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_value_from_system() {
        assert!(ThemeProvider::new(true).is_dark());
        assert!(!ThemeProvider::new(false).is_dark());
    }

    #[test]
    fn test_toggle() {
        let theme = ThemeProvider::new(false);
        assert!(theme.toggle());
        assert!(theme.is_dark());
        assert!(!theme.toggle());
        assert!(!theme.is_dark());
    }

    #[tokio::test]
    async fn test_follows_system_changes() {
        let (system_tx, system_rx) = watch::channel(false);
        let theme = ThemeProvider::new(*system_rx.borrow());
        let mut observer = theme.subscribe();
        let follower = theme.follow_system(system_rx);

        system_tx.send_replace(true);
        observer.changed().await.unwrap();
        assert!(*observer.borrow_and_update());
        assert!(theme.is_dark());

        // 手动覆盖之后，宿主的下一次变化仍然生效
        theme.toggle();
        assert!(!theme.is_dark());
        system_tx.send_replace(false);
        system_tx.send_replace(true);

        drop(system_tx);
        follower.await.unwrap();
        assert!(theme.is_dark());
    }
}
