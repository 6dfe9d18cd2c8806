use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    SendCode,
    VerifyCode,
    Cooldown,
    Handoff,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_active(&self, id: TaskId) -> bool {
        self.active == Some(id)
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
        self.cancel = started.cancel.clone();
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.clear();
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.cancel = None;
    }

    /// Clears the state and hands back its cancel token.
    pub fn take_cancel(&mut self) -> Option<CancellationToken> {
        let token = self.cancel.take();
        self.clear();
        token
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub send_code: TaskState,
    pub verify_code: TaskState,
    pub cooldown: TaskState,
    pub handoff: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::SendCode => &self.send_code,
            TaskKind::VerifyCode => &self.verify_code,
            TaskKind::Cooldown => &self.cooldown,
            TaskKind::Handoff => &self.handoff,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::SendCode => &mut self.send_code,
            TaskKind::VerifyCode => &mut self.verify_code,
            TaskKind::Cooldown => &mut self.cooldown,
            TaskKind::Handoff => &mut self.handoff,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.send_code.is_running()
            || self.verify_code.is_running()
            || self.cooldown.is_running()
            || self.handoff.is_running()
    }

    /// Cancel tokens of every running cancelable task.
    pub fn cancel_tokens(&self) -> Vec<CancellationToken> {
        [
            &self.send_code,
            &self.verify_code,
            &self.cooldown,
            &self.handoff,
        ]
        .into_iter()
        .filter_map(|state| state.cancel.clone())
        .collect()
    }
}
