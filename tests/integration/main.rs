mod app_events;
mod helpers;
mod history_paging;
mod reconciliation;
