//! Resolve desktop session use case

use thiserror::Error;

use crate::domain::session::{
    AmbientEnvironment, ElevationMarker, SessionContext, SessionSource, BUS_ADDRESS_VAR,
    DEFAULT_DISPLAY, DEFAULT_TARGET_UID, DISPLAY_VAR,
};

use super::ports::{DiscoveryError, ProbeError, ProcessRecord, ProcessTable, UserDirectory};

/// Errors that abort a session scan
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Session discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Session discovery failed: {0}")]
    Probe(#[from] ProbeError),
}

/// User whose session the resolver is looking for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetIdentity {
    pub uid: u32,
    pub user: Option<String>,
}

/// Finds the display and session bus of the desktop user.
///
/// Runs once at startup. When this process already has a bus address it is
/// used as is; otherwise the process table is scanned for the first process
/// owned by the target user that carries one.
pub struct ResolveSessionUseCase<P, U>
where
    P: ProcessTable,
    U: UserDirectory,
{
    processes: P,
    users: U,
    fallback_uid: u32,
}

impl<P, U> ResolveSessionUseCase<P, U>
where
    P: ProcessTable,
    U: UserDirectory,
{
    /// Create a new use case instance
    pub fn new(processes: P, users: U) -> Self {
        Self {
            processes,
            users,
            fallback_uid: DEFAULT_TARGET_UID,
        }
    }

    /// Uid to scan for when no elevation marker names a user
    pub fn with_fallback_uid(mut self, uid: u32) -> Self {
        self.fallback_uid = uid;
        self
    }

    /// Work out which user to look for.
    ///
    /// Marker uid first, then the uid of the marker's user name, then the
    /// fallback uid. The login name is completed from the user database.
    pub fn target_identity(&self, marker: Option<&ElevationMarker>) -> TargetIdentity {
        let marker_user = marker.and_then(|m| m.user.clone());
        let uid = marker
            .and_then(|m| m.uid)
            .or_else(|| marker_user.as_deref().and_then(|u| self.users.uid_of(u)))
            .unwrap_or(self.fallback_uid);
        let user = marker_user.or_else(|| self.users.name_of(uid));

        TargetIdentity { uid, user }
    }

    /// Resolve the session context.
    ///
    /// Returns the fallback context when nothing matches. Errors only when
    /// the process table cannot be read at all, or a process fails in a way
    /// that is neither an exit nor a permission problem.
    pub async fn execute(&self, env: &AmbientEnvironment) -> Result<SessionContext, ResolveError> {
        if let Some(bus) = env.bus_address.as_deref() {
            return Ok(self.from_ambient(env, bus));
        }

        let target = self.target_identity(env.elevation.as_ref());

        for pid in self.processes.pids().await? {
            let record = match self.inspect(pid, target.uid).await {
                Ok(Some(record)) => record,
                Ok(None) => continue,
                Err(e) if e.is_expected() => continue,
                Err(e) => return Err(e.into()),
            };

            let Some(bus) = record.var(BUS_ADDRESS_VAR) else {
                continue;
            };

            let display = record
                .var(DISPLAY_VAR)
                .or(env.display.as_deref())
                .unwrap_or(DEFAULT_DISPLAY);

            return Ok(SessionContext::new(
                target.user.clone().unwrap_or_default(),
                Some(target.uid),
                display,
                bus,
                SessionSource::ProcessScan { pid },
            ));
        }

        Ok(SessionContext::fallback())
    }

    /// Resolve, falling back to defaults on any error.
    ///
    /// The error, if any, is handed back so the caller can report it.
    pub async fn execute_or_fallback(
        &self,
        env: &AmbientEnvironment,
    ) -> (SessionContext, Option<ResolveError>) {
        match self.execute(env).await {
            Ok(ctx) => (ctx, None),
            Err(e) => (SessionContext::fallback(), Some(e)),
        }
    }

    fn from_ambient(&self, env: &AmbientEnvironment, bus: &str) -> SessionContext {
        let (user, uid) = match env.elevation.as_ref() {
            Some(marker) => {
                let target = self.target_identity(Some(marker));
                (target.user.unwrap_or_default(), Some(target.uid))
            }
            None => (String::new(), None),
        };

        SessionContext::new(
            user,
            uid,
            env.display.as_deref().unwrap_or(DEFAULT_DISPLAY),
            bus,
            SessionSource::Ambient,
        )
    }

    /// Read a process if `uid` owns it
    async fn inspect(&self, pid: u32, uid: u32) -> Result<Option<ProcessRecord>, ProbeError> {
        let owner = self.processes.owner_uid(pid).await?;
        if owner != uid {
            return Ok(None);
        }

        let env = self.processes.environ(pid).await?;
        Ok(Some(ProcessRecord {
            pid,
            uid: owner,
            env,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const BUS: &str = "unix:path=/run/user/1000/bus";

    enum Entry {
        Live(ProcessRecord),
        Failing(u32, ProbeError),
    }

    /// Scripted process table
    struct FakeProcessTable {
        entries: Vec<Entry>,
        environ_reads: AtomicUsize,
    }

    impl FakeProcessTable {
        fn new(entries: Vec<Entry>) -> Self {
            Self {
                entries,
                environ_reads: AtomicUsize::new(0),
            }
        }

        fn find(&self, pid: u32) -> Result<&ProcessRecord, ProbeError> {
            for entry in &self.entries {
                match entry {
                    Entry::Live(r) if r.pid == pid => return Ok(r),
                    Entry::Failing(p, e) if *p == pid => return Err(e.clone()),
                    _ => {}
                }
            }
            Err(ProbeError::Vanished { pid })
        }
    }

    #[async_trait]
    impl ProcessTable for FakeProcessTable {
        async fn pids(&self) -> Result<Vec<u32>, DiscoveryError> {
            Ok(self
                .entries
                .iter()
                .map(|e| match e {
                    Entry::Live(r) => r.pid,
                    Entry::Failing(pid, _) => *pid,
                })
                .collect())
        }

        async fn owner_uid(&self, pid: u32) -> Result<u32, ProbeError> {
            self.find(pid).map(|r| r.uid)
        }

        async fn environ(&self, pid: u32) -> Result<HashMap<String, String>, ProbeError> {
            self.environ_reads.fetch_add(1, Ordering::SeqCst);
            self.find(pid).map(|r| r.env.clone())
        }
    }

    struct UnavailableProcessTable;

    #[async_trait]
    impl ProcessTable for UnavailableProcessTable {
        async fn pids(&self) -> Result<Vec<u32>, DiscoveryError> {
            Err(DiscoveryError::Unavailable("/proc not mounted".to_string()))
        }

        async fn owner_uid(&self, pid: u32) -> Result<u32, ProbeError> {
            Err(ProbeError::Vanished { pid })
        }

        async fn environ(&self, pid: u32) -> Result<HashMap<String, String>, ProbeError> {
            Err(ProbeError::Vanished { pid })
        }
    }

    struct FakeUsers;

    impl UserDirectory for FakeUsers {
        fn uid_of(&self, name: &str) -> Option<u32> {
            match name {
                "alice" => Some(1000),
                "bob" => Some(1001),
                _ => None,
            }
        }

        fn name_of(&self, uid: u32) -> Option<String> {
            match uid {
                1000 => Some("alice".to_string()),
                1001 => Some("bob".to_string()),
                _ => None,
            }
        }
    }

    fn process(pid: u32, uid: u32, vars: &[(&str, &str)]) -> Entry {
        Entry::Live(ProcessRecord {
            pid,
            uid,
            env: vars
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        })
    }

    fn resolver(entries: Vec<Entry>) -> ResolveSessionUseCase<FakeProcessTable, FakeUsers> {
        ResolveSessionUseCase::new(FakeProcessTable::new(entries), FakeUsers)
    }

    #[tokio::test]
    async fn ambient_bus_short_circuits_scan() {
        let use_case = resolver(vec![process(10, 1000, &[(BUS_ADDRESS_VAR, "other")])]);
        let env = AmbientEnvironment::from_vars([(BUS_ADDRESS_VAR, BUS)]);

        let ctx = use_case.execute(&env).await.unwrap();

        assert_eq!(ctx.bus_address(), BUS);
        assert_eq!(ctx.display_address(), ":0");
        assert_eq!(ctx.source(), SessionSource::Ambient);
        assert_eq!(use_case.processes.environ_reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn ambient_keeps_existing_display_and_marker_user() {
        let use_case = resolver(vec![]);
        let env = AmbientEnvironment::from_vars([
            (BUS_ADDRESS_VAR, BUS),
            (DISPLAY_VAR, ":2"),
            ("SUDO_USER", "bob"),
        ]);

        let ctx = use_case.execute(&env).await.unwrap();

        assert_eq!(ctx.display_address(), ":2");
        assert_eq!(ctx.target_user(), "bob");
        assert_eq!(ctx.target_uid(), Some(1001));
    }

    #[tokio::test]
    async fn single_owned_process_yields_its_bus() {
        let use_case = resolver(vec![
            process(1, 0, &[]),
            process(20, 1000, &[(BUS_ADDRESS_VAR, BUS), (DISPLAY_VAR, ":1")]),
        ]);

        let ctx = use_case.execute(&AmbientEnvironment::default()).await.unwrap();

        assert_eq!(ctx.bus_address(), BUS);
        assert_eq!(ctx.display_address(), ":1");
        assert_eq!(ctx.target_user(), "alice");
        assert_eq!(ctx.target_uid(), Some(1000));
        assert_eq!(ctx.source(), SessionSource::ProcessScan { pid: 20 });
    }

    #[tokio::test]
    async fn no_match_returns_fallback() {
        let use_case = resolver(vec![
            process(1, 0, &[(BUS_ADDRESS_VAR, "root-bus")]),
            process(30, 1000, &[("HOME", "/home/alice")]),
        ]);

        let ctx = use_case.execute(&AmbientEnvironment::default()).await.unwrap();

        assert_eq!(ctx, SessionContext::fallback());
        assert_eq!(ctx.display_address(), ":0");
        assert_eq!(ctx.bus_address(), "");
    }

    #[tokio::test]
    async fn empty_table_returns_fallback() {
        let use_case = resolver(vec![]);
        let ctx = use_case.execute(&AmbientEnvironment::default()).await.unwrap();
        assert_eq!(ctx, SessionContext::fallback());
    }

    #[tokio::test]
    async fn processes_of_other_users_are_not_read() {
        let use_case = resolver(vec![
            process(5, 1001, &[(BUS_ADDRESS_VAR, "bob-bus")]),
            process(6, 1000, &[(BUS_ADDRESS_VAR, BUS)]),
        ]);

        let ctx = use_case.execute(&AmbientEnvironment::default()).await.unwrap();

        assert_eq!(ctx.bus_address(), BUS);
        assert_eq!(use_case.processes.environ_reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn sudo_uid_selects_target() {
        let use_case = resolver(vec![
            process(5, 1000, &[(BUS_ADDRESS_VAR, BUS)]),
            process(6, 1001, &[(BUS_ADDRESS_VAR, "bob-bus")]),
        ]);
        let env = AmbientEnvironment::from_vars([("SUDO_USER", "bob"), ("SUDO_UID", "1001")]);

        let ctx = use_case.execute(&env).await.unwrap();

        assert_eq!(ctx.bus_address(), "bob-bus");
        assert_eq!(ctx.target_user(), "bob");
    }

    #[tokio::test]
    async fn doas_user_is_mapped_to_uid() {
        let use_case = resolver(vec![process(6, 1001, &[(BUS_ADDRESS_VAR, "bob-bus")])]);
        let env = AmbientEnvironment::from_vars([("DOAS_USER", "bob")]);

        let ctx = use_case.execute(&env).await.unwrap();

        assert_eq!(ctx.bus_address(), "bob-bus");
        assert_eq!(ctx.target_uid(), Some(1001));
    }

    #[tokio::test]
    async fn fallback_uid_is_configurable() {
        let use_case = resolver(vec![
            process(5, 1000, &[(BUS_ADDRESS_VAR, BUS)]),
            process(6, 1001, &[(BUS_ADDRESS_VAR, "bob-bus")]),
        ])
        .with_fallback_uid(1001);

        let ctx = use_case.execute(&AmbientEnvironment::default()).await.unwrap();

        assert_eq!(ctx.bus_address(), "bob-bus");
    }

    #[tokio::test]
    async fn first_match_wins() {
        let use_case = resolver(vec![
            process(7, 1000, &[(BUS_ADDRESS_VAR, "first")]),
            process(8, 1000, &[(BUS_ADDRESS_VAR, "second")]),
        ]);

        let ctx = use_case.execute(&AmbientEnvironment::default()).await.unwrap();

        assert_eq!(ctx.bus_address(), "first");
        assert_eq!(ctx.source(), SessionSource::ProcessScan { pid: 7 });
    }

    #[tokio::test]
    async fn vanished_and_denied_processes_are_skipped() {
        let use_case = resolver(vec![
            Entry::Failing(3, ProbeError::Vanished { pid: 3 }),
            Entry::Failing(4, ProbeError::PermissionDenied { pid: 4 }),
            process(9, 1000, &[(BUS_ADDRESS_VAR, BUS)]),
        ]);

        let ctx = use_case.execute(&AmbientEnvironment::default()).await.unwrap();

        assert_eq!(ctx.bus_address(), BUS);
    }

    #[tokio::test]
    async fn ambient_display_used_when_process_has_none() {
        let use_case = resolver(vec![process(9, 1000, &[(BUS_ADDRESS_VAR, BUS)])]);
        let env = AmbientEnvironment::from_vars([(DISPLAY_VAR, ":5")]);

        let ctx = use_case.execute(&env).await.unwrap();

        assert_eq!(ctx.display_address(), ":5");
    }

    #[tokio::test]
    async fn unexpected_probe_error_propagates() {
        let use_case = resolver(vec![Entry::Failing(
            3,
            ProbeError::Unexpected {
                pid: 3,
                message: "I/O error".to_string(),
            },
        )]);

        let result = use_case.execute(&AmbientEnvironment::default()).await;

        assert!(matches!(result, Err(ResolveError::Probe(_))));
    }

    #[tokio::test]
    async fn execute_or_fallback_never_fails() {
        let use_case = ResolveSessionUseCase::new(UnavailableProcessTable, FakeUsers);

        let (ctx, err) = use_case
            .execute_or_fallback(&AmbientEnvironment::default())
            .await;

        assert_eq!(ctx, SessionContext::fallback());
        assert!(matches!(err, Some(ResolveError::Discovery(_))));
    }

    #[test]
    fn target_identity_prefers_marker_uid() {
        let use_case = resolver(vec![]);
        let marker = ElevationMarker {
            tool: crate::domain::session::ElevationTool::Pkexec,
            user: None,
            uid: Some(1001),
        };

        let target = use_case.target_identity(Some(&marker));

        assert_eq!(target.uid, 1001);
        assert_eq!(target.user.as_deref(), Some("bob"));
    }

    #[test]
    fn target_identity_defaults_to_fallback_uid() {
        let use_case = resolver(vec![]);
        let target = use_case.target_identity(None);
        assert_eq!(target.uid, 1000);
        assert_eq!(target.user.as_deref(), Some("alice"));
    }
}
