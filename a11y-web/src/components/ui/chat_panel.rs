use crate::dom::{self, JsonReply};
use crate::i18n::{t, use_language};
use a11y_core::{ChatError, ChatRequest, ChatResponse, ChatState};
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub enum ChatAction {
    Toggle,
    Input(String),
    Begin,
    Finish(Result<ChatResponse, ChatError>),
}

#[derive(Debug, Clone, Default, PartialEq)]
struct ChatModel(ChatState);

impl Reducible for ChatModel {
    type Action = ChatAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = self.0.clone();
        match action {
            ChatAction::Toggle => next.toggle(),
            ChatAction::Input(question) => next.set_question(question),
            ChatAction::Begin => {
                next.begin();
            }
            ChatAction::Finish(outcome) => next.finish(outcome),
        }
        Rc::new(Self(next))
    }
}

/// Map a completed POST onto the chat outcome.
pub fn reply_outcome(reply: JsonReply<ChatResponse>) -> Result<ChatResponse, ChatError> {
    match reply {
        JsonReply::Ok(response) => Ok(response),
        JsonReply::Status(code) => Err(ChatError::Status(code)),
        JsonReply::Malformed(reason) => Err(ChatError::Decode(reason)),
    }
}

#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
async fn send_question(request: ChatRequest) -> Result<ChatResponse, ChatError> {
    let endpoint = crate::config::chat_endpoint();
    match dom::post_json::<_, ChatResponse>(&endpoint, &request).await {
        Ok(reply) => reply_outcome(reply),
        Err(err) => Err(ChatError::Transport(dom::js_error_message(&err))),
    }
}

#[derive(Properties, PartialEq, Clone, Default)]
pub struct Props {
    /// Starting state; the demo always starts closed.
    #[prop_or_default]
    pub initial: ChatState,
}

#[function_component(ChatPanel)]
pub fn chat_panel(p: &Props) -> Html {
    let _lang = use_language();
    let initial = p.initial.clone();
    let state = use_reducer(move || ChatModel(initial));
    let chat = &state.0;

    let submit = {
        let state = state.clone();
        Callback::from(move |()| {
            if !state.0.can_send() {
                return;
            }
            let request = ChatRequest {
                message: state.0.question.clone(),
            };
            state.dispatch(ChatAction::Begin);
            let state = state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = send_question(request).await;
                if let Err(err) = &outcome {
                    dom::console_error(&format!("AI Chat Error: {err}"));
                }
                state.dispatch(ChatAction::Finish(outcome));
            });
        })
    };

    let on_toggle = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(ChatAction::Toggle))
    };
    let on_input = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.dispatch(ChatAction::Input(input.value()));
        })
    };
    let on_keydown = {
        let submit = submit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                submit.emit(());
            }
        })
    };
    let on_send = submit.reform(|_: MouseEvent| ());

    let fab_label = if chat.open {
        t("chat.close")
    } else {
        t("chat.open")
    };

    html! {
        <div class="a11y-chat">
            if chat.open {
                <div
                    id="a11y-chat-panel"
                    class="a11y-panel a11y-chat__panel"
                    role="dialog"
                    aria-labelledby="a11y-chat-title"
                >
                    <div class="a11y-panel__header">
                        <h2 id="a11y-chat-title">{ t("chat.title") }</h2>
                        <button
                            type="button"
                            class="a11y-icon-btn"
                            aria-label={t("chat.close")}
                            onclick={on_toggle.clone()}
                        >
                            <span aria-hidden="true">{ "×" }</span>
                        </button>
                    </div>
                    <div class="a11y-stepper">
                        <input
                            id="a11y-chat-input"
                            type="text"
                            aria-label={t("chat.placeholder")}
                            placeholder={t("chat.placeholder")}
                            value={chat.question.clone()}
                            oninput={on_input}
                            onkeydown={on_keydown}
                        />
                        <button
                            type="button"
                            class="a11y-icon-btn"
                            aria-label={t("chat.send")}
                            aria-busy={if chat.loading { "true" } else { "false" }}
                            disabled={!chat.can_send()}
                            onclick={on_send}
                        >
                            if chat.loading {
                                <span class="a11y-spinner" role="status" aria-label={t("chat.thinking")}></span>
                            } else {
                                <span aria-hidden="true">{ "➤" }</span>
                            }
                        </button>
                    </div>
                    if let Some(response) = chat.response.clone() {
                        <div class="a11y-chat__response" aria-live="polite">{ response }</div>
                    }
                </div>
            }
            <button
                type="button"
                class="a11y-fab a11y-chat-fab"
                aria-label={fab_label}
                aria-expanded={if chat.open { "true" } else { "false" }}
                aria-controls="a11y-chat-panel"
                onclick={on_toggle}
            >
                <span aria-hidden="true">{ "💬" }</span>
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11y_core::APOLOGY;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn render(initial: ChatState) -> String {
        block_on(LocalServerRenderer::<ChatPanel>::with_props(Props { initial }).render())
    }

    #[test]
    fn closed_panel_shows_only_the_toggle() {
        let html = render(ChatState::default());
        assert!(html.contains("Open AI chat"));
        assert!(!html.contains("a11y-chat-input"));
    }

    #[test]
    fn blank_question_disables_send() {
        let html = render(ChatState {
            open: true,
            question: "   ".into(),
            ..ChatState::default()
        });
        assert!(html.contains("AI Assistant"));
        assert!(html.contains("disabled"));
    }

    #[test]
    fn loading_shows_spinner() {
        let html = render(ChatState {
            open: true,
            question: "What is WCAG?".into(),
            loading: true,
            ..ChatState::default()
        });
        assert!(html.contains("a11y-spinner"));
        assert!(html.contains("aria-busy=\"true\""));
    }

    #[test]
    fn response_is_rendered() {
        let html = render(ChatState {
            open: true,
            response: Some(APOLOGY.into()),
            ..ChatState::default()
        });
        assert!(html.contains(APOLOGY));
    }

    #[test]
    fn replies_map_to_chat_errors() {
        let ok = ChatResponse {
            response: "Hi".into(),
        };
        assert_eq!(reply_outcome(JsonReply::Ok(ok.clone())), Ok(ok));
        assert_eq!(
            reply_outcome(JsonReply::Status(502)),
            Err(ChatError::Status(502))
        );
        assert!(matches!(
            reply_outcome(JsonReply::Malformed("missing field".into())),
            Err(ChatError::Decode(_))
        ));
    }

    #[test]
    fn reducer_runs_the_request_lifecycle() {
        let model = Rc::new(ChatModel::default());
        let model = model.reduce(ChatAction::Input("Hello".into()));
        let model = model.reduce(ChatAction::Begin);
        assert!(model.0.loading);
        let model = model.reduce(ChatAction::Finish(Err(ChatError::Status(500))));
        assert!(!model.0.loading);
        assert!(model.0.question.is_empty());
        assert_eq!(model.0.response.as_deref(), Some(APOLOGY));
    }
}
