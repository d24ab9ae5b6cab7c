use iced::{Element, Task, Theme};
use std::path::PathBuf;
use std::sync::Arc;

mod config;
mod error;
mod router;
mod state;
mod ui;

use config::{Config, ThemeMode};
use router::{requires_image_guard, Navigation, NavigationTarget, RouteName, RouteTable, Router};
use state::{ImageFile, ImageState, SharedImage};

/// File extensions offered by the image picker
const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "webp", "bmp", "gif", "tif", "tiff"];

/// Main application state
struct PhotoDesk {
    /// Routes, navigation guard and history
    router: Router,
    /// The currently loaded image, shared with every screen
    image: SharedImage,
    /// Status message to display to the user
    status: String,
    theme: ThemeMode,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked "Open Image"
    OpenImage,
    /// File picker closed, with the chosen file if any
    ImagePicked(Option<PathBuf>),
    /// Background probe of a picked file finished
    ImageLoaded(PathBuf, Result<ImageFile, Arc<error::Error>>),
    /// User clicked "Clear"
    ClearImage,
    /// Navigation attempt to a route path
    Navigate(&'static str),
    Back,
    Forward,
}

impl PhotoDesk {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = Config::load();

        // The built-in route table is static; if it fails validation the app cannot run
        let table = RouteTable::default_routes().expect("Built-in route table is invalid");
        let mut router = Router::new(table);
        router.before_each(requires_image_guard);

        let mut app = PhotoDesk {
            router,
            image: ImageState::shared(config.release_policy),
            status: "Ready. Open an image to start editing.".to_string(),
            theme: config.theme,
        };

        // An image path on the command line is opened right away
        if let Some(arg) = std::env::args_os().nth(1) {
            let path = PathBuf::from(arg);
            let result = ImageFile::from_path(&path);
            app.open(path, result);
        }

        if config.start_route != RouteName::HOME.as_str() {
            let result = app
                .router
                .push(NavigationTarget::Name(&config.start_route), &app.image.borrow());
            app.report(result.map(Some));
        }

        log::info!("🎨 Photo Desk started on {}", app.router.current().path);

        (app, Task::none())
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenImage => {
                return Task::perform(pick_image(), Message::ImagePicked);
            }
            Message::ImagePicked(Some(path)) => {
                self.status = format!("Opening {}...", path.display());
                return Task::perform(ImageFile::load(path.clone()), move |result| {
                    Message::ImageLoaded(path.clone(), result.map_err(Arc::new))
                });
            }
            Message::ImagePicked(None) => {}
            Message::ImageLoaded(path, result) => {
                self.open(path, result);
            }
            Message::ClearImage => {
                self.image.borrow_mut().clear_image();
                self.status = "Image cleared.".to_string();
            }
            Message::Navigate(path) => {
                let result = self
                    .router
                    .push(NavigationTarget::Path(path), &self.image.borrow());
                self.report(result.map(Some));
            }
            Message::Back => {
                let result = self.router.back(&self.image.borrow());
                self.report(result);
            }
            Message::Forward => {
                let result = self.router.forward(&self.image.borrow());
                self.report(result);
            }
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        ui::pages::view(&self.router, &self.image.borrow(), &self.status)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        match self.theme {
            ThemeMode::Dark => Theme::Dark,
            ThemeMode::Light => Theme::Light,
        }
    }

    /// Make a probed file the current image, or report why it failed
    fn open<E: std::fmt::Display>(&mut self, path: PathBuf, result: Result<ImageFile, E>) {
        match result {
            Ok(file) => {
                self.status = format!("Loaded {}.", file.name());
                self.image.borrow_mut().set_image_file(Some(file));
            }
            Err(e) => {
                log::error!("❌ Could not open {}: {}", path.display(), e);
                self.status = format!("Could not open {}: {}", path.display(), e);
            }
        }
    }

    /// Turn a navigation outcome into a status line
    fn report(&mut self, result: error::Result<Option<Navigation>>) {
        match result {
            Ok(Some(nav)) if nav.redirected() => {
                self.status = format!(
                    "{} needs an image. Open one first.",
                    nav.requested
                );
            }
            Ok(Some(nav)) => {
                self.status = format!("Showing {}.", nav.route.name);
            }
            Ok(None) => {}
            Err(e) => {
                log::warn!("⚠️  Navigation failed: {}", e);
                self.status = format!("Navigation failed: {}", e);
            }
        }
    }
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application("Photo Desk", PhotoDesk::update, PhotoDesk::view)
        .theme(PhotoDesk::theme)
        .centered()
        .run_with(PhotoDesk::new)
}

/// Show the native file picker without blocking the UI
async fn pick_image() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Select an Image")
        .add_filter("Images", &IMAGE_EXTENSIONS)
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}
