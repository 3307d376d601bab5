use anyhow::Result;
use shaderdeck_config::Config;
use std::sync::Arc;
use tokio::runtime::Runtime;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::cli::{RuntimeOptions, initial_document};
use crate::editor_window::{EditorStartup, EditorWindow, EditorWindowAction};
use crate::shader_watcher::ShaderWatcher;

/// Main application
pub struct App {
    config: Config,
    runtime: Arc<Runtime>,
    options: RuntimeOptions,
}

impl App {
    /// Load configuration and prepare to run
    pub fn new(runtime: Arc<Runtime>, config: Config, options: RuntimeOptions) -> Result<Self> {
        Ok(Self {
            config,
            runtime,
            options,
        })
    }

    /// Run the event loop until the window closes
    pub fn run(self) -> Result<()> {
        let startup = self.startup()?;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app_state = AppState {
            config: self.config,
            runtime: self.runtime,
            startup: Some(startup),
            editor: None,
        };
        event_loop.run_app(&mut app_state)?;

        Ok(())
    }

    /// Build the initial document and start the file watcher, before any window exists
    fn startup(&self) -> Result<EditorStartup> {
        let (document, params) = initial_document(&self.options, &self.config)?;

        let watcher = match &self.options.shader {
            Some(path) => match ShaderWatcher::new(path, self.config.hot_reload_debounce_ms) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    log::warn!("Shader hot reload disabled: {:#}", e);
                    None
                }
            },
            None => None,
        };

        Ok(EditorStartup {
            document,
            params,
            session_path: self.options.session.clone(),
            watcher,
        })
    }
}

/// Application state that handles events
struct AppState {
    config: Config,
    runtime: Arc<Runtime>,
    /// Consumed when the window is created
    startup: Option<EditorStartup>,
    editor: Option<EditorWindow>,
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.editor.is_some() {
            return;
        }
        let Some(startup) = self.startup.take() else {
            return;
        };

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.window_title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ))
            .with_min_inner_size(winit::dpi::LogicalSize::new(640, 400));

        match event_loop.create_window(window_attrs) {
            Ok(window) => {
                let window = Arc::new(window);
                let runtime = Arc::clone(&self.runtime);
                match runtime.block_on(EditorWindow::new(
                    Arc::clone(&window),
                    self.config.clone(),
                    startup,
                )) {
                    Ok(editor) => {
                        crate::debug_info!("APP", "Editor window ready");
                        editor.window().request_redraw();
                        self.editor = Some(editor);
                    }
                    Err(e) => {
                        log::error!("Failed to initialize: {:#}", e);
                        eprintln!("shaderdeck: error: {e:#}");
                        event_loop.exit();
                    }
                }
            }
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        if editor.handle_window_event(event) == EditorWindowAction::Close {
            log::info!("Editor window closed");
            // Drop GPU resources before the event loop exits
            self.editor = None;
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(editor) = self.editor.as_mut() {
            editor.poll_watcher();
        }
    }
}
