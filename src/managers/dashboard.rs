//! Page state machine: forms, filters, result containers and the section router.
//!
//! Fetching is split in three steps so that it never holds this state across
//! an await point:
//! 1. `submit` / `change_branch` / `change_state` record the user's input, put
//!    the affected containers in the loading state and return `PendingFetch`es.
//! 2. `PendingFetch::run` performs the GET with a `ProviderDataClient`.
//! 3. `apply` renders the outcome into its container, unless a newer request
//!    for that container was issued in the meantime.

use std::collections::BTreeMap;

use crate::managers::request_tracker::{RequestTicket, RequestTracker};
use crate::managers::tab_router::{TabRouter, TabRouterTrait};
use crate::services::provider_client::ProviderDataClient;
use crate::services::renderer::{Renderer, RendererTrait};
use crate::types::errors::{FetchError, RouterError};
use crate::types::git::{Branch, Commit, PullRequest};
use crate::types::provider::{Identity, Provider, ResourceKind};
use crate::types::request::ResourceRequest;
use crate::types::view::{
    branch_filter_id, BranchFilterUpdate, ContainerId, ContainerStatus, ContainerUpdate,
    ContainerView, FormState, ViewState,
};

/// Records decoded from one endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchedRecords {
    Branches(Vec<Branch>),
    Commits(Vec<Commit>),
    PullRequests(Vec<PullRequest>),
}

/// A request that has been issued but not yet performed.
#[derive(Debug, Clone)]
pub struct PendingFetch {
    pub ticket: RequestTicket,
    pub request: ResourceRequest,
}

/// A settled request, ready to be applied.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub ticket: RequestTicket,
    pub result: Result<FetchedRecords, FetchError>,
}

impl PendingFetch {
    pub fn container(&self) -> ContainerId {
        self.ticket.container
    }

    pub async fn run(self, client: &ProviderDataClient) -> FetchOutcome {
        let result = match self.request.kind {
            ResourceKind::Branches => client
                .fetch_resource::<Branch>(&self.request)
                .await
                .map(FetchedRecords::Branches),
            ResourceKind::Commits => client
                .fetch_resource::<Commit>(&self.request)
                .await
                .map(FetchedRecords::Commits),
            ResourceKind::PullRequests => client
                .fetch_resource::<PullRequest>(&self.request)
                .await
                .map(FetchedRecords::PullRequests),
        };
        FetchOutcome {
            ticket: self.ticket,
            result,
        }
    }
}

/// Everything the page shows, kept in memory rather than read back from the DOM.
#[derive(Debug)]
pub struct Dashboard {
    router: TabRouter,
    renderer: Renderer,
    tracker: RequestTracker,
    forms: BTreeMap<Provider, FormState>,
    containers: BTreeMap<ContainerId, ContainerView>,
}

impl Dashboard {
    pub fn new(router: TabRouter, renderer: Renderer) -> Self {
        let forms = Provider::ALL
            .iter()
            .map(|p| (*p, FormState::new(*p)))
            .collect();
        let containers = Provider::ALL
            .iter()
            .flat_map(|p| ContainerId::for_provider(*p))
            .map(|id| {
                (
                    id,
                    ContainerView {
                        status: ContainerStatus::Idle,
                        html: String::new(),
                    },
                )
            })
            .collect();

        Self {
            router,
            renderer,
            tracker: RequestTracker::new(),
            forms,
            containers,
        }
    }

    pub fn router(&self) -> &TabRouter {
        &self.router
    }

    pub fn navigate(&mut self, section_id: &str) -> Result<(), RouterError> {
        self.router.navigate_to(section_id)
    }

    pub fn load_fragment(&mut self, fragment: &str) -> String {
        self.router.handle_fragment(fragment).to_string()
    }

    pub fn form(&self, provider: Provider) -> Option<&FormState> {
        self.forms.get(&provider)
    }

    pub fn container(&self, id: &ContainerId) -> Option<&ContainerView> {
        self.containers.get(id)
    }

    /// Records a form submission and issues the three fetches of that provider.
    ///
    /// Commits are requested for the default branch and the branch filter is
    /// cleared; pull/merge requests use `state` or the provider default.
    pub fn submit(&mut self, identity: Identity, state: Option<&str>) -> Vec<PendingFetch> {
        let provider = identity.provider();
        let form = self.form_mut(provider);
        form.identity = Some(identity.clone());
        form.branch = None;
        form.state = state
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(provider.default_pr_state())
            .to_string();
        let state = form.state.clone();

        log::debug!("dashboard::submit {:?}", identity);
        vec![
            self.issue(ResourceRequest::branches(identity.clone())),
            self.issue(ResourceRequest::commits(identity.clone(), None)),
            self.issue(ResourceRequest::pull_requests(identity, Some(&state))),
        ]
    }

    /// Re-fetches commits for the chosen branch, reusing the last submitted identity.
    ///
    /// Returns `None` when nothing has been submitted for `provider` yet.
    pub fn change_branch(&mut self, provider: Provider, branch: Option<&str>) -> Option<PendingFetch> {
        let form = self.form_mut(provider);
        let identity = form.identity.clone()?;
        form.branch = branch
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string);
        let branch = form.branch.clone();
        Some(self.issue(ResourceRequest::commits(identity, branch.as_deref())))
    }

    /// Re-fetches pull/merge requests for the chosen state, reusing the last submitted identity.
    pub fn change_state(&mut self, provider: Provider, state: &str) -> Option<PendingFetch> {
        let form = self.form_mut(provider);
        let identity = form.identity.clone()?;
        let state = state.trim();
        form.state = if state.is_empty() {
            provider.default_pr_state().to_string()
        } else {
            state.to_string()
        };
        let state = form.state.clone();
        Some(self.issue(ResourceRequest::pull_requests(identity, Some(&state))))
    }

    /// Renders a settled fetch into its container.
    ///
    /// Returns `None` and leaves the container untouched when the outcome
    /// belongs to a request that has since been superseded.
    pub fn apply(&mut self, outcome: FetchOutcome) -> Option<ContainerUpdate> {
        let ticket = outcome.ticket;
        if !self.tracker.is_current(&ticket) {
            log::debug!(
                "discarding stale response #{} for {}",
                ticket.sequence,
                ticket.container.dom_id()
            );
            return None;
        }

        let provider = ticket.container.provider;
        let mut branch_filter = None;
        let (status, html) = match outcome.result {
            Ok(FetchedRecords::Branches(branches)) => {
                let form = self.form_mut(provider);
                form.branch_options = branches.iter().map(|b| b.name.clone()).collect();
                let selected = form.branch.clone();
                branch_filter = Some(BranchFilterUpdate {
                    select_id: branch_filter_id(provider),
                    options_html: self
                        .renderer
                        .render_branch_options(&branches, selected.as_deref()),
                });
                (ContainerStatus::Loaded, self.renderer.render_branches(&branches))
            }
            Ok(FetchedRecords::Commits(commits)) => {
                (ContainerStatus::Loaded, self.renderer.render_commits(&commits))
            }
            Ok(FetchedRecords::PullRequests(prs)) => {
                (ContainerStatus::Loaded, self.renderer.render_pull_requests(&prs))
            }
            Err(err) => {
                log::warn!("{} failed: {}", ticket.container.dom_id(), err);
                (ContainerStatus::Failed, self.renderer.render_error(&err.to_string()))
            }
        };

        self.containers.insert(
            ticket.container,
            ContainerView {
                status,
                html: html.clone(),
            },
        );

        Some(ContainerUpdate {
            container: ticket.container.dom_id(),
            status,
            html,
            sequence: ticket.sequence,
            branch_filter,
        })
    }

    pub fn view_state(&self) -> ViewState {
        ViewState {
            active_section: self.router.active_section().to_string(),
            fragment: self.router.fragment(),
            nav: self.router.nav_entries(),
            forms: self.forms.clone(),
            containers: self
                .containers
                .iter()
                .map(|(id, view)| (id.dom_id(), view.clone()))
                .collect(),
        }
    }

    fn form_mut(&mut self, provider: Provider) -> &mut FormState {
        self.forms
            .entry(provider)
            .or_insert_with(|| FormState::new(provider))
    }

    fn issue(&mut self, request: ResourceRequest) -> PendingFetch {
        let container = ContainerId::new(request.provider(), request.kind);
        let ticket = self.tracker.begin(container);
        self.containers.insert(
            container,
            ContainerView {
                status: ContainerStatus::Loading,
                html: self.renderer.render_loading(),
            },
        );
        PendingFetch { ticket, request }
    }
}
