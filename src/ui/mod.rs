/// Rendering of the dashboard panels. Widgets read from [`crate::state::AppState`]
/// and only mutate it through its handlers.
pub mod panels;
pub mod plot;
pub mod table;
