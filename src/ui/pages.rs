/// Screen rendering for each route
///
/// The crop and filter tools themselves live elsewhere; these screens show
/// which view is active and the image it would work on.
use iced::widget::{button, column, container, image, row, text, Column};
use iced::{Alignment, Element, Length};
use std::path::PathBuf;

use crate::router::{Route, Router, View};
use crate::state::ImageState;
use crate::Message;

/// Owned snapshot of the image state, so views don't hold the borrow
struct ImageSummary {
    name: String,
    url: String,
    path: Option<PathBuf>,
    width: u32,
    height: u32,
    size: u64,
    live_handles: usize,
}

impl ImageSummary {
    fn capture(state: &ImageState) -> Option<Self> {
        let file = state.image_file()?;
        let (width, height) = file.dimensions();
        Some(Self {
            name: file.name().to_string(),
            url: state.image_url().to_string(),
            path: state.display_path().map(|p| p.to_path_buf()),
            width,
            height,
            size: file.size(),
            live_handles: state.handles().live_count(),
        })
    }
}

/// Build the whole window: navigation bar, active screen, status line
pub fn view<'a>(router: &Router, state: &ImageState, status: &'a str) -> Element<'a, Message> {
    let summary = ImageSummary::capture(state);
    let current = router.current();

    let screen = match current.view {
        View::Home => home(summary.as_ref()),
        View::Crop => editor("Crop", summary.as_ref()),
        View::Filters => editor("Filters", summary.as_ref()),
    };

    let content: Column<Message> = column![
        nav_bar(router, current),
        screen,
        text(status).size(14),
    ]
    .spacing(20)
    .padding(30)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .into()
}

fn nav_bar<'a>(router: &Router, current: &Route) -> Element<'a, Message> {
    let mut bar = row![
        button("◀").on_press_maybe(router.can_go_back().then_some(Message::Back)),
        button("▶").on_press_maybe(router.can_go_forward().then_some(Message::Forward)),
    ]
    .spacing(8);

    // Every route stays clickable; the guard decides where it lands
    for route in router.table().routes() {
        let label = text(route.name.as_str());
        let entry = if route.path == current.path {
            button(label)
        } else {
            button(label).on_press(Message::Navigate(route.path))
        };
        bar = bar.push(entry);
    }

    bar.into()
}

fn home<'a>(summary: Option<&ImageSummary>) -> Element<'a, Message> {
    let details = match summary {
        Some(s) => format!(
            "{} ({}x{}, {} KB)\n{} ({} display handles live)",
            s.name,
            s.width,
            s.height,
            s.size / 1024,
            s.url,
            s.live_handles
        ),
        None => "No image loaded.".to_string(),
    };

    column![
        text("Photo Desk").size(48),
        row![
            button("Open Image").on_press(Message::OpenImage).padding(10),
            button("Clear")
                .on_press_maybe(summary.map(|_| Message::ClearImage))
                .padding(10),
        ]
        .spacing(10),
        text(details).size(16),
    ]
    .spacing(20)
    .align_x(Alignment::Center)
    .into()
}

fn editor<'a>(title: &'a str, summary: Option<&ImageSummary>) -> Element<'a, Message> {
    let preview: Element<'a, Message> = match summary.and_then(|s| s.path.clone()) {
        Some(path) => image(image::Handle::from_path(path))
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => text("No image loaded.").into(),
    };

    let caption = summary.map(|s| s.name.clone()).unwrap_or_default();

    column![text(title).size(32), text(caption).size(14), preview]
        .spacing(12)
        .align_x(Alignment::Center)
        .into()
}
