//! Badge, button, card, and modal components.
//!
//! Markup mirrors the element render trees so the scoped sheets from
//! [`crate::ElementStyles`] apply unchanged.

use leptos::ev::MouseEvent;
use leptos::*;
use ui_elements::components::{badge, button, card, modal};
use ui_elements::{BadgeColor, BadgeVariant, ButtonVariant, ModalStateChange, Size};

use crate::styles::{bool_token, merge_layout_class};

#[component]
/// Compact status label.
pub fn Badge(
    #[prop(default = BadgeVariant::Filled)] variant: BadgeVariant,
    #[prop(default = BadgeColor::Primary)] color: BadgeColor,
    #[prop(default = Size::Medium)] size: Size,
    #[prop(optional)] layout_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    view! {
        <span
            class=merge_layout_class("ui-element", layout_class)
            data-ui-primitive="true"
            data-ui-kind="badge"
            data-ui-variant=variant.token()
            data-ui-color=color.token()
            data-ui-size=size.token()
        >
            <span class=badge::class_list(variant.token(), color.token(), size.token())>
                {children()}
            </span>
        </span>
    }
}

#[component]
/// Action button. Clicks are swallowed while disabled.
pub fn Button(
    #[prop(default = ButtonVariant::Primary)] variant: ButtonVariant,
    #[prop(default = Size::Medium)] size: Size,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <span
            class=merge_layout_class("ui-element", layout_class)
            data-ui-primitive="true"
            data-ui-kind="button"
            data-ui-variant=variant.token()
            data-ui-size=size.token()
            data-ui-disabled=move || bool_token(disabled.get())
        >
            <button
                type="button"
                class=button::class_list(variant.token(), size.token())
                disabled=move || disabled.get()
                on:click=move |ev| {
                    if disabled.get_untracked() {
                        return;
                    }
                    if let Some(on_click) = on_click.as_ref() {
                        on_click.call(ev);
                    }
                }
            >
                {children()}
            </button>
        </span>
    }
}

#[component]
/// Content card with a 0-5 elevation shadow and optional border.
pub fn Card(
    #[prop(default = 1)] elevation: u8,
    #[prop(optional)] border: bool,
    #[prop(optional)] layout_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    let elevation = elevation.to_string();
    let style = format!(
        "box-shadow: {}; border: {};",
        card::box_shadow(&elevation),
        card::border_style(border)
    );
    view! {
        <div
            class=merge_layout_class("ui-element", layout_class)
            data-ui-primitive="true"
            data-ui-kind="card"
            data-ui-elevation=elevation
        >
            <div class="card" style=style>
                <div class="card-content">{children()}</div>
            </div>
        </div>
    }
}

#[component]
/// Dialog overlay bound to an open signal.
///
/// The close control, a click on the backdrop itself, and Escape close the modal. Every write to
/// `open` after mount is reported through `on_state_change`. The Escape listener lives exactly as
/// long as the component.
pub fn Modal(
    open: RwSignal<bool>,
    #[prop(optional)] on_state_change: Option<Callback<ModalStateChange>>,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] header: Option<Children>,
    #[prop(optional)] footer: Option<Children>,
    children: Children,
) -> impl IntoView {
    create_effect(move |mounted: Option<()>| {
        let is_open = open.get();
        if mounted.is_some() {
            if let Some(on_state_change) = on_state_change.as_ref() {
                on_state_change.call(ModalStateChange { open: is_open });
            }
        }
    });

    let close = move || {
        if open.get_untracked() {
            open.set(false);
        }
    };

    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == modal::ESCAPE_KEY {
            close();
        }
    });
    on_cleanup(move || escape_listener.remove());

    view! {
        <div
            class=merge_layout_class("ui-element", layout_class)
            data-ui-primitive="true"
            data-ui-kind="modal"
            data-ui-open=move || bool_token(open.get())
        >
            <div
                class="modal-backdrop"
                class:open=move || open.get()
                on:click=move |ev: MouseEvent| {
                    if ev.target() == ev.current_target() {
                        close();
                    }
                }
            >
                <div class="modal-container" role="dialog" aria-modal="true">
                    <button
                        type="button"
                        class="close-button"
                        aria-label="Close"
                        on:click=move |_| close()
                    >
                        "\u{00d7}"
                    </button>
                    <div class="modal-header">{header.map(|header| header())}</div>
                    <div class="modal-body">{children()}</div>
                    <div class="modal-footer">{footer.map(|footer| footer())}</div>
                </div>
            </div>
        </div>
    }
}
