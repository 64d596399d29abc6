//! # TUI Components
//!
//! Everything drawn on screen, one file per component.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive all data as struct fields, rebuilt every frame:
//! - `TitleBar`: navbar with app name, model, status and mode tag
//! - `GenerateButton`: the trigger control (ready / analyzing / disabled)
//! - `NoticePopup`: modal failure notice
//!
//! ### Stateful Components (Event-Driven)
//!
//! Keep presentation state between frames and react to `TuiEvent`s:
//! - `InputBox`: multi-line persona editor
//! - `OutputPanel` + `OutputPanelState`: scrollable generated prompt with copy badge
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── generate_button.rs
//! ├── notice.rs
//! ├── output_panel.rs
//! └── input_box/
//! ```

pub mod generate_button;
pub mod input_box;
pub mod notice;
pub mod output_panel;
pub mod title_bar;

pub use generate_button::GenerateButton;
pub use input_box::{InputBox, InputEvent};
pub use notice::NoticePopup;
pub use output_panel::{OutputPanel, OutputPanelState};
pub use title_bar::TitleBar;
