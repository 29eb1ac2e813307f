pub mod card_pane;
pub mod header;
pub mod help_overlay;
pub mod modal_view;
