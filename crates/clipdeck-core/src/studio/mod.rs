mod controls;
mod event;
mod settings;
#[allow(clippy::module_inception)]
mod studio;
mod view;

pub use {
    controls::{ControlPhase, Controls},
    event::{EventSender, StudioEvent, UserAction},
    settings::StudioSettings,
    studio::{Platform, Studio},
    view::{View, ViewState},
};
