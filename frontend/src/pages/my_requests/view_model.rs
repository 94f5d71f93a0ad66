use crate::api::{ApiError, Page, RequestKind};
use crate::components::pagination::{step_page, PageMove};
use crate::pages::requests::{
    repository::RequestsRepository,
    types::{own_detail_path, page_rows, RequestRow},
    utils::with_query,
};
use crate::state::session::use_api_client;
use leptos::*;

/// Rows per page in each of the employee's own tables.
pub const MY_PAGE_SIZE: u32 = 5;

type RowsResult = Result<Page<RequestRow>, ApiError>;

/// One independently paged table of the employee's own requests.
#[derive(Clone, Copy)]
pub struct OwnRequestTable {
    pub kind: RequestKind,
    pub page: RwSignal<u32>,
    pub total_pages: RwSignal<Option<u32>>,
    pub rows_resource: Resource<u32, RowsResult>,
}

impl OwnRequestTable {
    fn new(kind: RequestKind, repository: StoredValue<RequestsRepository>) -> Self {
        let page = create_rw_signal(0u32);
        let total_pages = create_rw_signal(None::<u32>);
        let rows_resource = create_resource(
            move || page.get(),
            move |page: u32| {
                let repo = repository.get_value();
                async move {
                    match kind {
                        RequestKind::Leave => {
                            repo.my_leaves(page, MY_PAGE_SIZE).await.map(page_rows)
                        }
                        RequestKind::Overtime => {
                            repo.my_overtime(page, MY_PAGE_SIZE).await.map(page_rows)
                        }
                    }
                }
            },
        );
        create_effect(move |_| {
            if let Some(Ok(loaded)) = rows_resource.get() {
                total_pages.set(Some(loaded.total_pages));
            }
        });
        Self {
            kind,
            page,
            total_pages,
            rows_resource,
        }
    }

    pub fn on_move(&self) -> impl Fn(PageMove) + Copy + 'static {
        let page = self.page;
        let total_pages = self.total_pages;
        move |step| {
            let next = step_page(page.get_untracked(), total_pages.get_untracked(), step);
            if next != page.get_untracked() {
                page.set(next);
            }
        }
    }

    pub fn row_href(&self) -> Callback<String, String> {
        let kind = self.kind;
        Callback::new(move |id: String| with_query(own_detail_path(kind), &[("id", id)]))
    }
}

#[derive(Clone, Copy)]
pub struct MyRequestsViewModel {
    pub leaves: OwnRequestTable,
    pub overtime: OwnRequestTable,
    pub remaining_leave: Resource<(), Result<f64, ApiError>>,
    pub remaining_overtime: Resource<(), Result<f64, ApiError>>,
}

/// Counter text: loading, the number, or a dash when it could not be read.
pub fn counter_label(result: Option<&Result<f64, ApiError>>, unit: &str) -> String {
    match result {
        None => "Đang tải...".to_string(),
        Some(Ok(value)) => format!("{} {}", value, unit),
        Some(Err(err)) => {
            log::warn!("remaining counter unavailable: {}", err);
            format!("-- {}", unit)
        }
    }
}

impl MyRequestsViewModel {
    pub fn new() -> Self {
        let repository = store_value(RequestsRepository::new(use_api_client()));
        let remaining_leave = create_resource(
            || (),
            move |_| {
                let repo = repository.get_value();
                async move { repo.remaining_leave_total().await }
            },
        );
        let remaining_overtime = create_resource(
            || (),
            move |_| {
                let repo = repository.get_value();
                async move { repo.remaining_overtime().await }
            },
        );
        Self {
            leaves: OwnRequestTable::new(RequestKind::Leave, repository),
            overtime: OwnRequestTable::new(RequestKind::Overtime, repository),
            remaining_leave,
            remaining_overtime,
        }
    }
}

pub fn use_my_requests_view_model() -> MyRequestsViewModel {
    match use_context::<MyRequestsViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = MyRequestsViewModel::new();
            provide_context(vm);
            vm
        }
    }
}
