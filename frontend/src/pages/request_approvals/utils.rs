use crate::api::{RequestKind, RequestListQuery};
use crate::components::pagination::{step_page, PageMove};
use crate::pages::requests::{
    types::{approval_path, approver_list_path, approver_page_size},
    utils::{translate_status_keyword, with_query},
};
use crate::utils::time::{current_month_key, parse_month_key};
use thiserror::Error;

pub const NO_BALANCE_DATA: &str = "Không tìm thấy dữ liệu cho nhân viên này";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceLookupError {
    #[error("Vui lòng nhập mã nhân viên")]
    MissingEmployeeCode,
    #[error("Vui lòng nhập năm hợp lệ")]
    InvalidYear,
}

/// Checks the overtime balance lookup inputs before any request is sent.
pub fn validate_balance_lookup(
    employee_code: &str,
    year: &str,
) -> Result<(String, i32), BalanceLookupError> {
    let employee_code = employee_code.trim();
    if employee_code.is_empty() {
        return Err(BalanceLookupError::MissingEmployeeCode);
    }
    let year = year
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|year| (1..=9999).contains(year))
        .ok_or(BalanceLookupError::InvalidYear)?;
    Ok((employee_code.to_string(), year))
}

/// List state mirrored into the URL. `search` is kept exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub month: String,
    pub page: u32,
    pub search: String,
}

impl ListParams {
    /// Reads `page`, `month` and `search` query values. Unusable values fall
    /// back to page 0 and the current month.
    pub fn from_query_values(
        page: Option<&str>,
        month: Option<&str>,
        search: Option<&str>,
    ) -> Self {
        let month = month
            .filter(|value| parse_month_key(value).is_some())
            .map(str::to_string)
            .unwrap_or_else(current_month_key);
        Self {
            month,
            page: page.and_then(|value| value.trim().parse().ok()).unwrap_or(0),
            search: search.unwrap_or_default().to_string(),
        }
    }

    pub fn set_month(&mut self, month: String) {
        self.month = month;
        self.page = 0;
    }

    pub fn set_search(&mut self, search: String) {
        self.search = search;
        self.page = 0;
    }

    pub fn go(&mut self, step: PageMove, total_pages: Option<u32>) {
        self.page = step_page(self.page, total_pages, step);
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("month", self.month.clone())];
        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        pairs
    }

    pub fn list_url(&self, kind: RequestKind) -> String {
        with_query(approver_list_path(kind), &self.query_pairs())
    }

    pub fn approval_url(&self, kind: RequestKind, id: &str) -> String {
        let mut pairs = vec![("id", id.to_string())];
        pairs.extend(self.query_pairs());
        with_query(approval_path(kind), &pairs)
    }

    /// The backend query. Only here is the keyword translated.
    pub fn api_query(&self, kind: RequestKind) -> RequestListQuery {
        let (year, month) = parse_month_key(&self.month)
            .or_else(|| parse_month_key(&current_month_key()))
            .unwrap_or((1970, 1));
        RequestListQuery {
            year,
            month,
            page: self.page,
            size: approver_page_size(kind),
            keyword: translate_status_keyword(&self.search),
        }
    }
}
