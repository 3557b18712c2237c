pub mod animation;
pub mod bar;
pub mod component;
pub mod config;
pub mod delegate;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod keyboard;
pub mod observe;
pub mod scroll;
pub mod surface;

pub use bar::DockBar;
pub use component::{Component, ComponentId, InputSurfaceId};
pub use config::{AnimationConfig, BarConfig, DockConfig};
pub use delegate::{BarDelegate, BarStatus};
pub use error::{Error, Result};
pub use keyboard::{KeyboardNotification, KeyboardSignal, KeyboardTiming};
pub use scroll::{PanPhase, ScrollMetrics};
pub use surface::{BarHost, HeadlessSurface, HostSurface};
