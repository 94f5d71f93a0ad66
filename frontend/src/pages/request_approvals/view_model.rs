use super::utils::{validate_balance_lookup, ListParams, NO_BALANCE_DATA};
use crate::api::{ApiError, OvertimeSummary, Page, RequestKind};
use crate::components::pagination::{step_page, PageMove};
use crate::pages::requests::{
    repository::RequestsRepository,
    types::{page_rows, RequestRow},
};
use crate::state::session::use_api_client;
use crate::utils::{lifetime::MountGuard, time::today_in_app_tz};
use chrono::Datelike;
use leptos::*;

type RowsResult = Result<Page<RequestRow>, ApiError>;

#[derive(Clone, Copy)]
pub struct RequestApprovalsViewModel {
    pub kind: RequestKind,
    pub params: RwSignal<ListParams>,
    /// Search box text not yet committed with Enter.
    pub search_draft: RwSignal<String>,
    /// Total pages from the last successful response.
    pub total_pages: RwSignal<Option<u32>>,
    pub rows_resource: Resource<(RequestKind, ListParams), RowsResult>,
}

fn apply_optional_rows_result(result: Option<&RowsResult>, total_pages: RwSignal<Option<u32>>) {
    match result {
        Some(Ok(page)) => total_pages.set(Some(page.total_pages)),
        Some(Err(err)) => log::warn!("approver list failed: {}", err),
        None => {}
    }
}

impl RequestApprovalsViewModel {
    pub fn new(kind: RequestKind, initial: ListParams) -> Self {
        let repository = store_value(RequestsRepository::new(use_api_client()));
        let search_draft = create_rw_signal(initial.search.clone());
        let params = create_rw_signal(initial);
        let total_pages = create_rw_signal(None::<u32>);

        let rows_resource = create_resource(
            move || (kind, params.get()),
            move |(kind, params): (RequestKind, ListParams)| {
                let repo = repository.get_value();
                let query = params.api_query(kind);
                async move {
                    match kind {
                        RequestKind::Leave => repo.all_leaves(&query).await.map(page_rows),
                        RequestKind::Overtime => repo.all_overtime(&query).await.map(page_rows),
                    }
                }
            },
        );

        create_effect(move |_| {
            apply_optional_rows_result(rows_resource.get().as_ref(), total_pages);
        });

        Self {
            kind,
            params,
            search_draft,
            total_pages,
            rows_resource,
        }
    }

    pub fn page(&self) -> Signal<u32> {
        let params = self.params;
        Signal::derive(move || params.with(|params| params.page))
    }

    pub fn on_month_change(&self) -> impl Fn(String) + Copy + 'static {
        let params = self.params;
        move |month| params.update(|params| params.set_month(month))
    }

    pub fn on_search_input(&self) -> impl Fn(String) + Copy + 'static {
        let search_draft = self.search_draft;
        move |search| search_draft.set(search)
    }

    /// Enter in the search box commits the draft. Reloads even when neither
    /// the search nor the page changes.
    pub fn on_search_submit(&self) -> impl Fn(()) + Copy + 'static {
        let params = self.params;
        let search_draft = self.search_draft;
        let rows_resource = self.rows_resource;
        move |_| {
            let draft = search_draft.get_untracked();
            let unchanged =
                params.with_untracked(|params| params.page == 0 && params.search == draft);
            if unchanged {
                rows_resource.refetch();
            } else {
                params.update(|params| params.set_search(draft));
            }
        }
    }

    pub fn on_page_move(&self) -> impl Fn(PageMove) + Copy + 'static {
        let params = self.params;
        let total_pages = self.total_pages;
        move |step| {
            let total = total_pages.get_untracked();
            let current = params.with_untracked(|params| params.page);
            if step_page(current, total, step) != current {
                params.update(|params| params.go(step, total));
            }
        }
    }

    pub fn row_href(&self) -> Callback<String, String> {
        let params = self.params;
        let kind = self.kind;
        Callback::new(move |id: String| params.with_untracked(|params| params.approval_url(kind, &id)))
    }
}

type SummaryResult = Result<OvertimeSummary, ApiError>;

/// Yearly overtime lookup opened from the approver overtime list.
#[derive(Clone, Copy)]
pub struct OvertimeBalanceViewModel {
    pub open: RwSignal<bool>,
    pub employee_code: RwSignal<String>,
    pub year: RwSignal<String>,
    pub summary: RwSignal<Option<OvertimeSummary>>,
    pub error: RwSignal<Option<String>>,
    pub lookup_action: Action<(String, i32), Option<SummaryResult>>,
}

fn apply_optional_summary_result(
    result: Option<SummaryResult>,
    summary: RwSignal<Option<OvertimeSummary>>,
    error: RwSignal<Option<String>>,
) {
    match result {
        Some(Ok(found)) => {
            error.set(None);
            summary.set(Some(found));
        }
        Some(Err(err)) => {
            log::warn!("overtime balance lookup failed: {}", err);
            summary.set(None);
            error.set(Some(NO_BALANCE_DATA.to_string()));
        }
        None => {}
    }
}

fn current_year() -> String {
    today_in_app_tz().year().to_string()
}

impl OvertimeBalanceViewModel {
    pub fn new() -> Self {
        let repository = store_value(RequestsRepository::new(use_api_client()));
        let guard = MountGuard::attach();
        let summary = create_rw_signal(None::<OvertimeSummary>);
        let error = create_rw_signal(None::<String>);

        let lookup_action = create_action(move |(employee_code, year): &(String, i32)| {
            let repo = repository.get_value();
            let employee_code = employee_code.clone();
            let year = *year;
            async move {
                let result = repo.overtime_summary(&employee_code, year).await;
                guard.run("overtime balance", || result)
            }
        });

        create_effect(move |_| {
            apply_optional_summary_result(lookup_action.value().get().flatten(), summary, error);
        });

        Self {
            open: create_rw_signal(false),
            employee_code: create_rw_signal(String::new()),
            year: create_rw_signal(current_year()),
            summary,
            error,
            lookup_action,
        }
    }

    pub fn loading(&self) -> Signal<bool> {
        self.lookup_action.pending().into()
    }

    pub fn on_open(&self) -> impl Fn(()) + Copy + 'static {
        let open = self.open;
        move |_| open.set(true)
    }

    /// Closing forgets the inputs and the last result.
    pub fn on_close(&self) -> impl Fn(()) + Copy + 'static {
        let vm = *self;
        move |_| {
            vm.open.set(false);
            vm.employee_code.set(String::new());
            vm.year.set(current_year());
            vm.summary.set(None);
            vm.error.set(None);
        }
    }

    pub fn on_lookup(&self) -> impl Fn(()) + Copy + 'static {
        let vm = *self;
        move |_| {
            if vm.lookup_action.pending().get_untracked() {
                return;
            }
            let lookup = validate_balance_lookup(
                &vm.employee_code.get_untracked(),
                &vm.year.get_untracked(),
            );
            vm.summary.set(None);
            match lookup {
                Ok(input) => {
                    vm.error.set(None);
                    vm.lookup_action.dispatch(input);
                }
                Err(err) => vm.error.set(Some(err.to_string())),
            }
        }
    }
}

pub fn use_request_approvals_view_model(
    kind: RequestKind,
    initial: impl FnOnce() -> ListParams,
) -> RequestApprovalsViewModel {
    match use_context::<RequestApprovalsViewModel>() {
        Some(vm) if vm.kind == kind => vm,
        _ => {
            let vm = RequestApprovalsViewModel::new(kind, initial());
            provide_context(vm);
            vm
        }
    }
}
