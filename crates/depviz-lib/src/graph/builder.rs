//! Graph construction from a lookup provider
//!
//! The builder walks outward from a root, asking the provider for each
//! package's immediate dependencies and storing them in a [`DependencyGraph`].
//! Breadth-first and depth-first walks store the same edge set; they differ
//! only in the order the provider is called.
//!
//! All traversal state (visited sets, depths, the DFS stack) lives in the
//! call, so one builder can run any number of builds.

use super::traverse::{ExclusionFilter, Frame, expands};
use super::{DependencyGraph, NodeStatus, PackageId};
use crate::impl_fromstr_for_value_enum;
use crate::provider::{DependencyLookup, LookupError};
use std::collections::{HashMap, HashSet};
use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, trace, warn};

/// Order in which the frontier is expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Discipline {
    /// Tier by tier, FIFO
    #[default]
    #[serde(alias = "bfs")]
    BreadthFirst,
    /// Explicit stack, children before siblings
    #[serde(alias = "dfs")]
    DepthFirst,
}

impl clap::ValueEnum for Discipline {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::BreadthFirst, Self::DepthFirst]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::BreadthFirst => Some(
                clap::builder::PossibleValue::new("bfs")
                    .alias("breadth-first")
                    .alias("breadth"),
            ),
            Self::DepthFirst => Some(
                clap::builder::PossibleValue::new("dfs")
                    .alias("depth-first")
                    .alias("depth"),
            ),
        }
    }
}

impl_fromstr_for_value_enum!(Discipline, "invalid traversal discipline");

/// Malformed build requests; rejected before any lookup
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Root package identifier is empty")]
    EmptyRoot,

    #[error("Invalid depth bound: {max_depth} (must be at least 1)")]
    InvalidBound { max_depth: usize },

    #[error("Invalid job count: {jobs} (must be at least 1)")]
    InvalidJobs { jobs: usize },
}

/// Parameters of a single build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub root: PackageId,
    /// Packages at this depth or deeper are not expanded; `None` is unbounded
    pub max_depth: Option<usize>,
    /// Exclusion substring, matched case-insensitively
    pub filter: Option<String>,
    pub discipline: Discipline,
    /// Concurrent lookups per breadth-first tier
    pub jobs: usize,
}

impl BuildRequest {
    pub fn new(root: impl Into<PackageId>) -> Self {
        Self {
            root: root.into(),
            max_depth: None,
            filter: None,
            discipline: Discipline::default(),
            jobs: 1,
        }
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_filter(mut self, filter: Option<&str>) -> Self {
        self.filter = filter.map(str::to_string);
        self
    }

    pub fn with_discipline(mut self, discipline: Discipline) -> Self {
        self.discipline = discipline;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        if self.root.is_empty() {
            return Err(BuildError::EmptyRoot);
        }
        if let Some(0) = self.max_depth {
            return Err(BuildError::InvalidBound { max_depth: 0 });
        }
        if self.jobs == 0 {
            return Err(BuildError::InvalidJobs { jobs: 0 });
        }
        Ok(())
    }

    /// Whether a package reached at `depth` gets its dependencies fetched
    pub fn expands(&self, depth: usize) -> bool {
        expands(depth, self.max_depth)
    }
}

/// Cooperative cancellation shared between a build and its caller
///
/// Checked before each lookup; a cancelled build stops early and returns
/// what it stored so far.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A package whose lookup failed during the build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
    pub package: PackageId,
    pub error: LookupError,
}

/// What happened during a build, beyond the edges themselves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub root: PackageId,
    pub discipline: Discipline,
    /// Provider calls issued
    pub lookups: usize,
    /// Packages reached again after being visited
    ///
    /// Breadth-first builds record diamonds here as well as cycles; only
    /// [`GraphQuery::detect_cycles`](super::GraphQuery::detect_cycles)
    /// separates the two. Depth-first builds record back edges only.
    pub revisits: Vec<PackageId>,
    pub failures: Vec<LookupFailure>,
    /// Packages left unexpanded by the depth bound
    pub truncated: Vec<PackageId>,
    pub cancelled: bool,
}

impl BuildReport {
    fn new(request: &BuildRequest) -> Self {
        Self {
            root: request.root.clone(),
            discipline: request.discipline,
            lookups: 0,
            revisits: Vec::new(),
            failures: Vec::new(),
            truncated: Vec::new(),
            cancelled: false,
        }
    }

    fn record_revisit(&mut self, package: PackageId) {
        if !self.revisits.contains(&package) {
            trace!("Revisit of {}", package);
            self.revisits.push(package);
        }
    }

    /// No failures and not cancelled
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }
}

/// Dependency list for one package, either already stored or just fetched
enum Resolution {
    Stored(Vec<PackageId>),
    Fetched(Result<Vec<PackageId>, LookupError>),
}

enum Pending {
    Stored(Vec<PackageId>),
    Spawned(JoinHandle<Option<Result<Vec<PackageId>, LookupError>>>),
}

/// Per-build state
struct Session<'r> {
    request: &'r BuildRequest,
    filter: ExclusionFilter,
    report: BuildReport,
}

impl<'r> Session<'r> {
    fn new(request: &'r BuildRequest) -> Self {
        Self {
            request,
            filter: ExclusionFilter::new(request.filter.as_deref()),
            report: BuildReport::new(request),
        }
    }

    fn truncate(&mut self, graph: &mut DependencyGraph, package: PackageId) {
        if graph.mark_truncated(&package) {
            self.report.truncated.push(package);
        }
    }

    /// Store a resolution and return the children to walk
    fn settle(
        &mut self,
        graph: &mut DependencyGraph,
        package: PackageId,
        resolution: Resolution,
    ) -> Vec<PackageId> {
        match resolution {
            Resolution::Stored(dependencies) => self.filter.apply(dependencies),
            Resolution::Fetched(Ok(dependencies)) => {
                let dependencies = self.filter.apply(dependencies);
                graph.add_edges(&package, &dependencies);
                dependencies
            }
            Resolution::Fetched(Err(error)) => {
                warn!(package = %package, "Lookup failed, treating as leaf: {}", error);
                graph.mark_failed(&package, error.to_string());
                self.report.failures.push(LookupFailure { package, error });
                Vec::new()
            }
        }
    }

    fn finish(mut self, graph: &DependencyGraph) -> BuildReport {
        // A package truncated on one path may be expanded via a shorter one
        let mut seen = HashSet::new();
        self.report.truncated.retain(|package| {
            matches!(graph.status(package), Some(NodeStatus::Truncated)) && seen.insert(package.clone())
        });
        self.report
    }
}

#[derive(Default)]
struct DepthFirstState {
    best_depth: HashMap<PackageId, usize>,
    on_path: HashSet<PackageId>,
    stack: Vec<Frame>,
}

/// Builds dependency graphs through a lookup provider
pub struct GraphBuilder<P> {
    provider: Arc<P>,
    cancellation: CancellationFlag,
}

impl<P: DependencyLookup + 'static> GraphBuilder<P> {
    pub fn new(provider: P) -> Self {
        Self::shared(Arc::new(provider))
    }

    /// Build through a provider the caller keeps a handle to
    pub fn shared(provider: Arc<P>) -> Self {
        Self {
            provider,
            cancellation: CancellationFlag::new(),
        }
    }

    pub fn with_cancellation(mut self, cancellation: CancellationFlag) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Handle that cancels builds run by this builder
    pub fn cancellation(&self) -> CancellationFlag {
        self.cancellation.clone()
    }

    /// Build a fresh graph rooted at `request.root`
    pub async fn build(
        &self,
        request: &BuildRequest,
    ) -> Result<(DependencyGraph, BuildReport), BuildError> {
        let mut graph = DependencyGraph::new();
        let report = self.build_into(&mut graph, request).await?;
        Ok((graph, report))
    }

    /// Extend an existing graph from another root
    ///
    /// Packages that are already keys are not looked up again; their stored
    /// lists are walked instead.
    pub async fn build_into(
        &self,
        graph: &mut DependencyGraph,
        request: &BuildRequest,
    ) -> Result<BuildReport, BuildError> {
        request.validate()?;

        debug!(
            root = %request.root,
            max_depth = ?request.max_depth,
            filter = ?request.filter,
            discipline = %request.discipline,
            jobs = request.jobs,
            "Building dependency graph"
        );

        let span = crate::progress_span!("build", root = %request.root);
        let mut session = Session::new(request);

        async {
            match request.discipline {
                Discipline::BreadthFirst => self.breadth_first(graph, &mut session).await,
                Discipline::DepthFirst => self.depth_first(graph, &mut session).await,
            }
        }
        .instrument(span)
        .await;

        let report = session.finish(graph);
        debug!(
            packages = graph.package_count(),
            edges = graph.edge_count(),
            lookups = report.lookups,
            failures = report.failures.len(),
            cancelled = report.cancelled,
            "Build finished"
        );
        Ok(report)
    }

    async fn breadth_first(&self, graph: &mut DependencyGraph, session: &mut Session<'_>) {
        let mut visited: HashSet<PackageId> = HashSet::new();
        let mut tier = vec![session.request.root.clone()];
        let mut depth = 0usize;

        while !tier.is_empty() {
            let mut expand = Vec::with_capacity(tier.len());
            for package in tier {
                if !session.request.expands(depth) {
                    session.truncate(graph, package);
                    continue;
                }
                if !visited.insert(package.clone()) {
                    session.report.record_revisit(package);
                    continue;
                }
                expand.push(package);
            }

            trace!(depth, packages = expand.len(), "Expanding tier");
            let resolved = self.resolve_tier(graph, session, expand).await;

            let mut next = Vec::new();
            for (package, resolution) in resolved {
                for child in session.settle(graph, package, resolution) {
                    if visited.contains(&child) {
                        session.report.record_revisit(child);
                    } else {
                        next.push(child);
                    }
                }
            }

            if session.report.cancelled {
                break;
            }
            tier = next;
            depth += 1;
        }
    }

    /// Resolve one tier, keeping tier order in the result
    async fn resolve_tier(
        &self,
        graph: &DependencyGraph,
        session: &mut Session<'_>,
        tier: Vec<PackageId>,
    ) -> Vec<(PackageId, Resolution)> {
        if session.request.jobs > 1 && tier.len() > 1 {
            return self.resolve_concurrently(graph, session, tier).await;
        }

        let mut resolved = Vec::with_capacity(tier.len());
        for package in tier {
            if graph.contains(&package) {
                let stored = graph.dependencies_of(&package);
                resolved.push((package, Resolution::Stored(stored)));
                continue;
            }
            if self.cancellation.is_cancelled() {
                session.report.cancelled = true;
                break;
            }
            session.report.lookups += 1;
            let result = self.provider.lookup(&package).await;
            resolved.push((package, Resolution::Fetched(result)));
        }
        resolved
    }

    async fn resolve_concurrently(
        &self,
        graph: &DependencyGraph,
        session: &mut Session<'_>,
        tier: Vec<PackageId>,
    ) -> Vec<(PackageId, Resolution)> {
        let semaphore = Arc::new(Semaphore::new(session.request.jobs));
        let mut pending = Vec::with_capacity(tier.len());

        for package in tier {
            if graph.contains(&package) {
                let stored = graph.dependencies_of(&package);
                pending.push((package, Pending::Stored(stored)));
                continue;
            }

            let provider = Arc::clone(&self.provider);
            let semaphore = Arc::clone(&semaphore);
            let cancellation = self.cancellation.clone();
            let id = package.clone();

            let task = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok()?;
                if cancellation.is_cancelled() {
                    return None;
                }
                Some(provider.lookup(&id).await)
            });
            pending.push((package, Pending::Spawned(task)));
        }

        // Results are applied by this task alone, in tier order
        let mut resolved = Vec::with_capacity(pending.len());
        for (package, entry) in pending {
            match entry {
                Pending::Stored(stored) => resolved.push((package, Resolution::Stored(stored))),
                Pending::Spawned(task) => match task.await {
                    Ok(Some(result)) => {
                        session.report.lookups += 1;
                        resolved.push((package, Resolution::Fetched(result)));
                    }
                    Ok(None) => session.report.cancelled = true,
                    Err(join_error) => {
                        session.report.lookups += 1;
                        let error = LookupError::unavailable(&package, join_error);
                        resolved.push((package, Resolution::Fetched(Err(error))));
                    }
                },
            }
        }
        resolved
    }

    async fn depth_first(&self, graph: &mut DependencyGraph, session: &mut Session<'_>) {
        let mut state = DepthFirstState::default();
        let root = session.request.root.clone();

        if self.enter(graph, session, &mut state, root, 0).await.is_break() {
            return;
        }

        while let Some(frame) = state.stack.last_mut() {
            let depth = frame.depth + 1;
            let Some(child) = frame.next_child() else {
                if let Some(done) = state.stack.pop() {
                    state.on_path.remove(&done.package);
                }
                continue;
            };

            if state.on_path.contains(&child) {
                session.report.record_revisit(child);
                continue;
            }
            // Finished at this depth or shallower; nothing new to reach
            if state
                .best_depth
                .get(&child)
                .is_some_and(|&seen| seen <= depth)
            {
                continue;
            }
            if self
                .enter(graph, session, &mut state, child, depth)
                .await
                .is_break()
            {
                return;
            }
        }
    }

    /// Push a frame for `package` reached at `depth`
    async fn enter(
        &self,
        graph: &mut DependencyGraph,
        session: &mut Session<'_>,
        state: &mut DepthFirstState,
        package: PackageId,
        depth: usize,
    ) -> ControlFlow<()> {
        state.best_depth.insert(package.clone(), depth);

        if !session.request.expands(depth) {
            session.truncate(graph, package);
            return ControlFlow::Continue(());
        }

        let resolution = if graph.contains(&package) {
            Resolution::Stored(graph.dependencies_of(&package))
        } else {
            if self.cancellation.is_cancelled() {
                session.report.cancelled = true;
                return ControlFlow::Break(());
            }
            session.report.lookups += 1;
            Resolution::Fetched(self.provider.lookup(&package).await)
        };

        let children = session.settle(graph, package.clone(), resolution);
        state.on_path.insert(package.clone());
        state.stack.push(Frame::new(package, depth, children));
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    include!("builder.test.rs");
}
