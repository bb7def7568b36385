//! The card view: the grouped display document rendered as an HTML page
//! inside an embedded rendering surface, plus the message bridge that
//! carries checkbox activations back to the host's task store.

pub mod bridge;
pub mod diff;
pub mod handler;
pub mod render;
pub mod surface;
pub mod view;

pub use bridge::{bridge_channel, BridgeReceiver, BridgeSender, InboundMessage, OutboundCall};
pub use diff::{plan_update, UpdatePlan};
pub use handler::{BridgeEffect, CardBridgeHandler};
pub use render::{render_document, render_group};
pub use surface::{HtmlFileSurface, RenderSurface};
pub use view::CardView;
