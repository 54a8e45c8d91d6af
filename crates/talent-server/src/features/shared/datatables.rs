//! DataTables server-side processing types
//!
//! The DataTables widget posts `draw/start/length/order/search/columns` and
//! expects `draw/recordsTotal/recordsFiltered/data` back. Feature queries map
//! these onto their own list parameters.

use serde::{Deserialize, Serialize};

use crate::db::query::{RecordsCount, SortDirection};

/// One entry of the DataTables `order` array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    /// Index of the column being sorted
    #[serde(default)]
    pub column: i64,
    #[serde(default)]
    pub dir: String,
}

impl SortOrder {
    /// `"asc"` sorts ascending, anything else descending
    pub fn direction(&self) -> SortDirection {
        if self.dir == "asc" {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }
}

/// Global search box contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Search {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub regex: bool,
}

impl Search {
    /// Search term, or `None` when the box is empty
    pub fn term(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}

/// Column description sent by the widget. Accepted but not used for paging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default)]
    pub orderable: bool,
    #[serde(default)]
    pub search: Search,
}

/// Page window derived from `start`/`length`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page_number: i64,
    /// `None` when the widget asked for every row
    pub page_size: Option<i64>,
}

impl PageWindow {
    /// `length <= 0` (DataTables sends -1 for "All") disables paging
    pub fn from_start_length(start: i64, length: i64) -> Self {
        if length <= 0 {
            return Self {
                page_number: 1,
                page_size: None,
            };
        }
        Self {
            page_number: (start.max(0) / length).saturating_add(1),
            page_size: Some(length),
        }
    }
}

/// Response body expected by the DataTables widget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTableResponse<T> {
    pub draw: i64,
    pub records_total: i64,
    pub records_filtered: i64,
    pub data: Vec<T>,
}

impl<T> DataTableResponse<T> {
    pub fn new(data: Vec<T>, draw: i64, counts: RecordsCount) -> Self {
        Self {
            draw,
            records_total: counts.records_total,
            records_filtered: counts.records_filtered,
            data,
        }
    }
}
