use iced::widget::text::Span;
use iced::widget::{
    button, column, container, operation, rich_text, row, scrollable, span, text, text_input, Id,
    Space,
};
use iced::{
    application, event, window, Background, Border, Color, Element, Event, Length, Shadow, Size,
    Subscription, Task, Theme,
};
use std::process::{Command, Stdio};
use std::sync::Arc;

use crate::client::HttpChatBackend;
use crate::config::WidgetConfig;
use crate::conversation::Conversation;
use crate::error::ChatWidgetError;
use crate::format::{format_message, Segment};
use crate::interfaces::backend::ChatBackend;
use crate::message::{ChatMessage, Sender};
use crate::protocol::{ChatResponse, UiSize};

const TITLE: &str = "Real Estate Assistant";
const SUBTITLE: &str = "Notion-style AI Chat";
const INPUT_PLACEHOLDER: &str = "Type / for commands or ask anything...";
const MESSAGE_LIST: &str = "chat-messages";

fn message_list_id() -> Id {
    Id::new(MESSAGE_LIST)
}

pub struct ChatWidget {
    conversation: Conversation,
    backend: Arc<dyn ChatBackend>,
    measured_size: Option<UiSize>,
    default_size: UiSize,
}

#[derive(Clone, Debug)]
pub enum Message {
    DraftChanged(String),
    SendPressed,
    ResponseReady(Result<ChatResponse, ChatWidgetError>),
    WindowResized(Size),
    LinkClicked(String),
}

pub fn launch(config: WidgetConfig) -> iced::Result {
    tracing::info!(endpoint = %config.endpoint_url, "launching chat widget");
    application(
        move || {
            let backend = Arc::new(HttpChatBackend::from_config(&config));
            (ChatWidget::new(&config, backend), Task::none())
        },
        update,
        view,
    )
    .title(app_title)
    .theme(app_theme)
    .window(window::Settings {
        size: Size::new(UiSize::FALLBACK.width, UiSize::FALLBACK.height),
        min_size: Some(Size::new(320.0, 420.0)),
        ..Default::default()
    })
    .subscription(subscription)
    .run()
}

fn app_title(_state: &ChatWidget) -> String {
    TITLE.to_string()
}

fn app_theme(_state: &ChatWidget) -> Theme {
    Theme::Dark
}

fn subscription(_state: &ChatWidget) -> Subscription<Message> {
    event::listen_with(|event, _status, _id| match event {
        Event::Window(window::Event::Opened { size, .. })
        | Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
        _ => None,
    })
}

impl ChatWidget {
    pub fn new(config: &WidgetConfig, backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            conversation: Conversation::new(config.greeting.clone()),
            backend,
            measured_size: None,
            default_size: config.default_ui_size,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Last measured window size, or the configured default before the
    /// first measurement.
    pub fn ui_size(&self) -> UiSize {
        self.measured_size.unwrap_or(self.default_size)
    }
}

pub fn update(state: &mut ChatWidget, message: Message) -> Task<Message> {
    match message {
        Message::DraftChanged(value) => {
            state.conversation.set_draft(value);
            Task::none()
        }
        Message::SendPressed => {
            let Some(request) = state.conversation.begin_submit(state.ui_size()) else {
                return Task::none();
            };
            let backend = Arc::clone(&state.backend);
            Task::batch([
                operation::snap_to_end(message_list_id()),
                Task::perform(
                    async move { backend.send(request).await },
                    Message::ResponseReady,
                ),
            ])
        }
        Message::ResponseReady(result) => {
            if state.conversation.complete(result).is_none() {
                return Task::none();
            }
            operation::snap_to_end(message_list_id())
        }
        Message::WindowResized(size) => {
            if size.width > 0.0 && size.height > 0.0 {
                state.measured_size = Some(UiSize::new(size.width, size.height));
            }
            Task::none()
        }
        Message::LinkClicked(uri) => {
            if let Err(err) = open_uri_best_effort(&uri) {
                tracing::warn!(uri = %uri, error = %err, "failed to open link");
            }
            Task::none()
        }
    }
}

pub fn view(state: &ChatWidget) -> Element<'_, Message> {
    let header = column![text(TITLE).size(24), text(SUBTITLE).size(13)].spacing(2);

    let mut list = state
        .conversation
        .messages()
        .iter()
        .fold(column!().spacing(10).width(Length::Fill), |col, msg| {
            col.push(view_message(msg))
        });
    if state.conversation.is_loading() {
        list = list.push(
            container(text("● ● ●").size(14))
                .padding(12)
                .style(bot_bubble),
        );
    }
    let list = list.push(Space::new().height(12));

    let loading = state.conversation.is_loading();
    let composer = row![
        text_input(INPUT_PLACEHOLDER, state.conversation.draft())
            .on_input_maybe((!loading).then_some(Message::DraftChanged))
            .on_submit(Message::SendPressed)
            .padding(12)
            .width(Length::Fill),
        button("Send")
            .padding([10, 16])
            .style(iced::widget::button::primary)
            .on_press_maybe(state.conversation.can_submit().then_some(Message::SendPressed)),
    ]
    .spacing(10)
    .align_y(iced::Alignment::Center);

    let content = column![
        container(header).padding(8).width(Length::Fill).style(panel),
        container(
            scrollable(container(list).padding([0, 10]).width(Length::Fill))
                .id(message_list_id())
                .height(Length::Fill)
                .width(Length::Fill)
                .anchor_bottom()
        )
        .padding(8)
        .style(panel)
        .width(Length::Fill)
        .height(Length::Fill),
        composer
    ]
    .spacing(10)
    .padding(12)
    .height(Length::Fill);

    container(container(content).height(Length::Fill).style(shell))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_message(msg: &ChatMessage) -> Element<'_, Message> {
    let body = format_message(msg.text())
        .into_iter()
        .fold(column!().spacing(6), |col, paragraph| {
            let mut spans: Vec<Span<'static, String>> = paragraph
                .segments
                .into_iter()
                .map(|segment| match segment {
                    Segment::Text(raw) => span(raw),
                    Segment::Link(url) => span(url.clone())
                        .link(url)
                        .underline(true)
                        .color(Color::from_rgb(0.62, 0.78, 1.0)),
                })
                .collect();
            if spans.is_empty() {
                spans.push(span(String::new()));
            }
            col.push(rich_text(spans).size(15).on_link_click(Message::LinkClicked))
        });

    let footer = text(format!("{} {}", msg.sender().icon(), msg.local_time())).size(11);

    let bubble = container(column![body, footer].spacing(6))
        .padding(12)
        .max_width(560.0)
        .style(match msg.sender() {
            Sender::User => user_bubble,
            Sender::Bot => bot_bubble,
        });

    match msg.sender() {
        Sender::User => row![Space::new().width(Length::Fill), bubble].into(),
        Sender::Bot => row![bubble, Space::new().width(Length::Fill)].into(),
    }
}

fn bubble_style(
    text_color: Option<Color>,
    background: Color,
    radius: f32,
    alpha: f32,
) -> container::Style {
    container::Style {
        text_color,
        background: Some(Background::Color(background)),
        border: Border {
            radius: radius.into(),
            width: 1.0,
            color: Color::from_rgba(1.0, 1.0, 1.0, alpha),
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

fn shell(_theme: &Theme) -> container::Style {
    bubble_style(None, Color::from_rgba(0.07, 0.10, 0.18, 0.65), 18.0, 0.10)
}

fn panel(_theme: &Theme) -> container::Style {
    bubble_style(None, Color::from_rgba(0.10, 0.14, 0.24, 0.58), 16.0, 0.12)
}

fn user_bubble(_theme: &Theme) -> container::Style {
    bubble_style(
        Some(Color::WHITE),
        Color::from_rgba(0.39, 0.40, 0.95, 0.62),
        16.0,
        0.14,
    )
}

fn bot_bubble(_theme: &Theme) -> container::Style {
    bubble_style(
        Some(Color::WHITE),
        Color::from_rgba(0.20, 0.24, 0.34, 0.70),
        16.0,
        0.14,
    )
}

const NO_ARGS: &[&str] = &[];
const WINDOWS_START: &[&str] = &["/C", "start", ""];

/// Program and leading arguments that hand a URL to the desktop's browser.
fn browser_launcher() -> Option<(&'static str, &'static [&'static str])> {
    if cfg!(target_os = "linux") {
        Some(("xdg-open", NO_ARGS))
    } else if cfg!(target_os = "macos") {
        Some(("open", NO_ARGS))
    } else if cfg!(target_os = "windows") {
        Some(("cmd", WINDOWS_START))
    } else {
        None
    }
}

fn open_uri_best_effort(uri: &str) -> std::io::Result<()> {
    if uri.trim().is_empty() {
        return Ok(());
    }
    let Some((program, prefix)) = browser_launcher() else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "no URL opener for this platform",
        ));
    };
    Command::new(program)
        .args(prefix)
        .arg(uri)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}
