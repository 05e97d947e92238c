//! Sort indicator helpers shared by list headers

/// Arrow for the header of `field`; empty when the list is sorted by another field
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field != field {
        ""
    } else if ascending {
        " ▲"
    } else {
        " ▼"
    }
}

pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}
