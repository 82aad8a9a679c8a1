/// What to do when one object receives both collection and dictionary adds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContainerPolicy {
    /// The most recent add decides the classification; a warning is logged.
    #[default]
    LastWriteWins,
    /// Reclassification is a fatal error.
    Strict,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriterOptions {
    max_deferred_depth: usize,
    max_scope_depth: usize,
    class_name_heuristic: bool,
    container_policy: ContainerPolicy,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            max_deferred_depth: 64,
            max_scope_depth: 256,
            class_name_heuristic: true,
            container_policy: ContainerPolicy::LastWriteWins,
        }
    }
}

impl WriterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upper bound for nested deferred-property realizations.
    pub fn with_max_deferred_depth(mut self, depth: usize) -> Self {
        self.max_deferred_depth = depth;
        self
    }

    pub fn max_deferred_depth(&self) -> usize {
        self.max_deferred_depth
    }

    /// Upper bound for open namespace scopes, counted across deferred
    /// regions since nested writers inherit the enclosing scopes.
    pub fn with_max_scope_depth(mut self, depth: usize) -> Self {
        self.max_scope_depth = depth;
        self
    }

    pub fn max_scope_depth(&self) -> usize {
        self.max_scope_depth
    }

    /// Whether a leading `PushConstant` may stand in for a dropped `CheckPeerType`.
    pub fn with_class_name_heuristic(mut self, enabled: bool) -> Self {
        self.class_name_heuristic = enabled;
        self
    }

    pub fn class_name_heuristic(&self) -> bool {
        self.class_name_heuristic
    }

    pub fn with_container_policy(mut self, policy: ContainerPolicy) -> Self {
        self.container_policy = policy;
        self
    }

    pub fn container_policy(&self) -> ContainerPolicy {
        self.container_policy
    }
}
