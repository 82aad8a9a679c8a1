/// Reserved member names the writer sets on objects it builds.
pub mod names {
    pub const X_CLASS: &str = "x:Class";
    pub const X_CONNECTION_ID: &str = "x:ConnectionId";
    pub const X_UID: &str = "x:Uid";
    pub const NAME: &str = "Name";
    pub const TARGET_TYPE: &str = "TargetType";
}

/// Directives that never correspond to a registered property.
pub const DIRECTIVES: &[&str] = &[names::X_CLASS, names::X_CONNECTION_ID, names::X_UID];

pub fn is_directive(name: &str) -> bool {
    DIRECTIVES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_use_the_x_prefix() {
        assert!(DIRECTIVES.iter().all(|name| name.starts_with("x:")));
        assert!(is_directive(names::X_UID));
        assert!(!is_directive(names::NAME));
    }
}
