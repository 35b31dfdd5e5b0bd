//! # Input Components
//!
//! Form inputs used by the tab/section and sign-in dialogs:
//! - **TextInput**: Single-line text input
//! - **TextArea**: Multi-line text input
//! - **PositionInput**: Integer input with step controls
//! - **Toggle**: Clickable on/off card
//!
//! Styled with Tailwind classes.

use dioxus::prelude::*;
use edutalks_core::Position;

// ============================================================================
// Text Input Component
// ============================================================================

/// Properties for TextInput component
#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    /// Input value
    pub value: String,

    /// Label text (optional)
    #[props(default)]
    pub label: Option<String>,

    /// Placeholder text
    #[props(default)]
    pub placeholder: Option<String>,

    /// Help text shown below input
    #[props(default)]
    pub help_text: Option<String>,

    /// Error message (shows error state)
    #[props(default)]
    pub error: Option<String>,

    #[props(default = false)]
    pub required: bool,

    #[props(default = false)]
    pub disabled: bool,

    /// Input type (text, password, ...)
    #[props(default = "text".to_string())]
    pub input_type: String,

    /// Prefix text
    #[props(default)]
    pub prefix: Option<String>,

    /// Change handler
    #[props(default)]
    pub on_change: EventHandler<String>,

    /// Enter key handler
    #[props(default)]
    pub on_enter: EventHandler<()>,
}

/// Single-line text input component
#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    let input_class = build_input_class(props.error.is_some(), props.disabled);

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                label {
                    class: "block text-sm font-medium text-slate-300 mb-1.5",
                    "{label}"
                    if props.required {
                        span { class: "text-rose-400 ml-0.5", "*" }
                    }
                }
            }

            div {
                class: "relative flex items-center",

                if let Some(prefix) = &props.prefix {
                    span {
                        class: "absolute left-3 text-slate-400 text-sm pointer-events-none",
                        "{prefix}"
                    }
                }

                input {
                    class: "{input_class}",
                    class: if props.prefix.is_some() { "pl-8" } else { "" },
                    r#type: "{props.input_type}",
                    value: "{props.value}",
                    placeholder: props.placeholder.as_deref().unwrap_or(""),
                    disabled: props.disabled,
                    oninput: move |e| props.on_change.call(e.value()),
                    onkeydown: move |e| {
                        if e.key() == Key::Enter {
                            props.on_enter.call(());
                        }
                    },
                }
            }

            HelpOrError { error: props.error.clone(), help_text: props.help_text.clone() }
        }
    }
}

// ============================================================================
// Text Area Component
// ============================================================================

/// Properties for TextArea component
#[derive(Props, Clone, PartialEq)]
pub struct TextAreaProps {
    pub value: String,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub placeholder: Option<String>,

    #[props(default)]
    pub help_text: Option<String>,

    #[props(default)]
    pub error: Option<String>,

    /// Visible rows
    #[props(default = 3)]
    pub rows: u32,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Multi-line text input component
#[component]
pub fn TextArea(props: TextAreaProps) -> Element {
    let class = format!(
        "{} resize-y",
        build_input_class(props.error.is_some(), props.disabled)
    );

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                label {
                    class: "block text-sm font-medium text-slate-300 mb-1.5",
                    "{label}"
                }
            }

            textarea {
                class: "{class}",
                rows: "{props.rows}",
                value: "{props.value}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                disabled: props.disabled,
                oninput: move |e| props.on_change.call(e.value()),
            }

            HelpOrError { error: props.error.clone(), help_text: props.help_text.clone() }
        }
    }
}

// ============================================================================
// Position Input Component
// ============================================================================

/// Properties for PositionInput component
#[derive(Props, Clone, PartialEq)]
pub struct PositionInputProps {
    pub value: Position,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub help_text: Option<String>,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<Position>,
}

/// Display position input with decrement/increment controls
#[component]
pub fn PositionInput(props: PositionInputProps) -> Element {
    let input_class = build_input_class(false, props.disabled);
    let value = props.value;

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                label {
                    class: "block text-sm font-medium text-slate-300 mb-1.5",
                    "{label}"
                }
            }

            div {
                class: "relative flex items-center",

                button {
                    class: "absolute left-0 h-full px-3 text-slate-400 hover:text-slate-200 hover:bg-slate-700/50 rounded-l-lg transition-colors disabled:opacity-50 disabled:cursor-not-allowed",
                    r#type: "button",
                    disabled: props.disabled || value <= 0,
                    onclick: move |_| props.on_change.call(step_position(value, -1)),
                    "−"
                }

                input {
                    class: "{input_class} text-center px-10",
                    r#type: "number",
                    value: "{value}",
                    min: "0",
                    step: "1",
                    disabled: props.disabled,
                    oninput: move |e| {
                        if let Some(parsed) = parse_position(&e.value()) {
                            props.on_change.call(parsed);
                        }
                    },
                }

                button {
                    class: "absolute right-0 h-full px-3 text-slate-400 hover:text-slate-200 hover:bg-slate-700/50 rounded-r-lg transition-colors disabled:opacity-50 disabled:cursor-not-allowed",
                    r#type: "button",
                    disabled: props.disabled,
                    onclick: move |_| props.on_change.call(step_position(value, 1)),
                    "+"
                }
            }

            HelpOrError { error: None, help_text: props.help_text.clone() }
        }
    }
}

// ============================================================================
// Toggle Component
// ============================================================================

/// Properties for Toggle component
#[derive(Props, Clone, PartialEq)]
pub struct ToggleProps {
    pub checked: bool,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub help_text: Option<String>,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<bool>,
}

/// Toggle styled as a clickable card
#[component]
pub fn Toggle(props: ToggleProps) -> Element {
    let card_bg = if props.checked {
        "bg-indigo-600/10 border-indigo-500/50"
    } else {
        "bg-slate-800/50 border-slate-600/50"
    };
    let state_class = if props.disabled {
        "opacity-50 cursor-not-allowed"
    } else {
        "hover:bg-slate-700/50 hover:border-slate-500"
    };

    rsx! {
        div {
            class: "toggle-card flex items-center gap-3 p-3 rounded-lg border cursor-pointer transition-all select-none {card_bg} {state_class}",
            onclick: move |_| {
                if !props.disabled {
                    props.on_change.call(!props.checked);
                }
            },

            div {
                class: "flex-shrink-0 w-5 h-5 rounded border-2 flex items-center justify-center transition-colors",
                class: if props.checked { "bg-indigo-600 border-indigo-600" } else { "bg-transparent border-slate-500" },

                if props.checked {
                    svg {
                        class: "w-3 h-3 text-white",
                        fill: "none",
                        stroke: "currentColor",
                        stroke_width: "3",
                        view_box: "0 0 24 24",
                        path { d: "M5 13l4 4L19 7" }
                    }
                }
            }

            div {
                class: "flex flex-col min-w-0 flex-1",
                if let Some(label) = &props.label {
                    span { class: "text-sm font-medium text-slate-200 leading-tight", "{label}" }
                }
                if let Some(help) = &props.help_text {
                    span { class: "text-xs text-slate-400 mt-0.5 leading-tight", "{help}" }
                }
            }
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

#[component]
fn HelpOrError(error: Option<String>, help_text: Option<String>) -> Element {
    if let Some(error) = error {
        rsx! { p { class: "mt-1 text-xs text-rose-400", "{error}" } }
    } else if let Some(help) = help_text {
        rsx! { p { class: "mt-1 text-xs text-slate-500", "{help}" } }
    } else {
        rsx! {}
    }
}

/// Build input class string
fn build_input_class(has_error: bool, disabled: bool) -> String {
    let mut classes = vec![
        "w-full",
        "px-3",
        "py-2",
        "bg-slate-800",
        "border",
        "rounded-lg",
        "text-sm",
        "text-slate-100",
        "placeholder-slate-500",
        "transition-colors",
        "focus:outline-none",
        "focus:ring-2",
    ];

    if has_error {
        classes.extend(["border-rose-500", "focus:ring-rose-500/30", "focus:border-rose-500"]);
    } else {
        classes.extend(["border-slate-700", "focus:ring-indigo-500/30", "focus:border-indigo-500"]);
    }

    if disabled {
        classes.extend(["opacity-50", "cursor-not-allowed"]);
    }

    classes.join(" ")
}

/// Positions are never negative
fn step_position(value: Position, delta: Position) -> Position {
    value.saturating_add(delta).max(0)
}

fn parse_position(raw: &str) -> Option<Position> {
    raw.trim().parse::<Position>().ok().filter(|p| *p >= 0)
}

// ============================================================================
// Tests
// ============================================================================
