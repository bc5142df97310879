//! Application - App Initialization and Window Management
//!
//! Main entry point for the GPUI application.

use gpui::{
    App, AppContext, Application, Bounds, SharedString, TitlebarOptions, WindowBounds,
    WindowOptions, actions, px,
};

use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::domain::config::AppConfig;
use crate::domain::player::Player;
use crate::features::roster::RosterPage;
use crate::loader::controller::LoadController;

actions!(roster, [Quit]);

/// Run the roster application
pub fn run_app(config: AppConfig, loader: LoadController<Player>) {
    Application::new().run(move |cx: &mut App| {
        cx.on_action(|_: &Quit, cx: &mut App| cx.quit());

        // Quit the app when all windows are closed (macOS behavior)
        cx.on_window_closed(|cx| {
            if cx.windows().is_empty() {
                cx.quit();
            }
        })
        .detach();

        let bounds = Bounds::centered(
            None,
            gpui::size(px(DEFAULT_WINDOW_WIDTH), px(DEFAULT_WINDOW_HEIGHT)),
            cx,
        );
        let window_options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            titlebar: Some(TitlebarOptions {
                title: Some(SharedString::from("Player Roster")),
                appears_transparent: true,
                traffic_light_position: Some(gpui::point(px(9.0), px(9.0))),
            }),
            ..Default::default()
        };

        let list_config = config.list.clone();
        if let Err(e) = cx.open_window(window_options, move |_window, cx| {
            cx.new(|cx| RosterPage::new(list_config, loader, cx))
        }) {
            tracing::error!("Failed to open main window: {}", e);
            cx.quit();
            return;
        }

        cx.activate(true);
    });
}
