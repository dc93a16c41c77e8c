//! Cooperative per-frame scheduler
//!
//! Views that animate between gesture ticks (the sphere's damped rotation)
//! register a task here on mount and unschedule it on unmount. The bridge's
//! `render_frame` runs whatever is still scheduled, once per display refresh.

/// Work that runs on every display refresh while scheduled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameTask {
    /// Ease the sphere toward its target rotation and re-place its items
    SphereSpin,
}

/// Identifies one scheduling of a task; stale handles unschedule nothing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    tasks: Vec<(TaskHandle, FrameTask)>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, task: FrameTask) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push((handle, task));
        handle
    }

    /// Returns false if the handle was not (or no longer) scheduled
    pub fn unschedule(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|(h, _)| *h != handle);
        self.tasks.len() != before
    }

    /// Snapshot of the tasks due this frame, in scheduling order
    pub fn due(&self) -> Vec<FrameTask> {
        self.tasks.iter().map(|(_, task)| *task).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unschedule_removes_only_that_handle() {
        let mut scheduler = FrameScheduler::new();
        let a = scheduler.schedule(FrameTask::SphereSpin);
        let b = scheduler.schedule(FrameTask::SphereSpin);

        assert!(scheduler.unschedule(a));
        assert_eq!(scheduler.due(), vec![FrameTask::SphereSpin]);
        assert!(scheduler.unschedule(b));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn stale_handle_is_a_no_op() {
        let mut scheduler = FrameScheduler::new();
        let a = scheduler.schedule(FrameTask::SphereSpin);
        assert!(scheduler.unschedule(a));
        assert!(!scheduler.unschedule(a));
        assert!(scheduler.is_empty());
    }
}
