use crate::config;
use crate::dom;
use crate::embed::PLACEHOLDER_SCRIPT;
use crate::i18n::{t, use_language};
use yew::prelude::*;

/// Where the integration snippets load the script from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptSource {
    Local,
    Cdn,
}

impl ScriptSource {
    fn url(self) -> String {
        match self {
            Self::Local => config::script_url(),
            Self::Cdn => config::cdn_script_url(),
        }
    }
}

#[must_use]
pub fn basic_snippet(source: ScriptSource) -> String {
    format!(
        "<script src=\"{}\" data-auto-init=\"true\"></script>",
        source.url()
    )
}

/// Calls are queued by the placeholder until the script has loaded.
#[must_use]
pub fn manual_snippet(source: ScriptSource) -> String {
    format!(
        concat!(
            "<script>\n",
            "  {}\n",
            "  window.SkillblendA11y.init({{\n",
            "    position: 'bottom-left', // bottom-right, top-right, top-left\n",
            "    theme: 'auto' // light, dark, auto\n",
            "  }});\n",
            "</script>\n",
            "<script src=\"{}\" data-auto-init=\"false\" async></script>"
        ),
        PLACEHOLDER_SCRIPT,
        source.url()
    )
}

pub const DESTROY_SNIPPET: &str = "<script>\n  window.SkillblendA11y.destroy();\n</script>";

#[derive(Properties, PartialEq, Clone)]
struct SnippetProps {
    id: AttrValue,
    heading: AttrValue,
    code: AttrValue,
}

#[function_component(Snippet)]
fn snippet(p: &SnippetProps) -> Html {
    let copied = use_state(|| false);
    let on_copy = {
        let copied = copied.clone();
        let code = p.code.clone();
        Callback::from(move |_: MouseEvent| {
            dom::copy_to_clipboard(&code);
            copied.set(true);
            let copied = copied.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let _ = dom::sleep_ms(2000).await;
                copied.set(false);
            });
        })
    };
    let heading_id = format!("{}-heading", p.id);
    html! {
        <section class="snippet" aria-labelledby={heading_id.clone()}>
            <h3 id={heading_id}>{ p.heading.clone() }</h3>
            <pre><code id={p.id.clone()}>{ p.code.clone() }</code></pre>
            <button type="button" class="copy-btn" onclick={on_copy} aria-live="polite">
                { if *copied { t("embed.copied") } else { t("embed.copy") } }
            </button>
        </section>
    }
}

/// Integration guide for site owners: script tag, manual init and teardown.
#[function_component(EmbedDocsPage)]
pub fn embed_docs_page() -> Html {
    let _lang = use_language();
    let source = use_state(|| ScriptSource::Local);

    let pick = |next: ScriptSource| {
        let source = source.clone();
        Callback::from(move |_: MouseEvent| source.set(next))
    };
    let pressed = |candidate: ScriptSource| {
        if *source == candidate { "true" } else { "false" }
    };

    html! {
        <main id="main" class="embed-docs">
            <h1>{ t("embed.title") }</h1>
            <p>{ t("embed.intro") }</p>
            <div class="source-switch" role="group">
                <button type="button" aria-pressed={pressed(ScriptSource::Local)} onclick={pick(ScriptSource::Local)}>
                    { t("embed.source_local") }
                </button>
                <button type="button" aria-pressed={pressed(ScriptSource::Cdn)} onclick={pick(ScriptSource::Cdn)}>
                    { t("embed.source_cdn") }
                </button>
            </div>
            <Snippet id="snippet-basic" heading={t("embed.basic_heading")} code={basic_snippet(*source)} />
            <p>{ t("embed.manual_intro") }</p>
            <Snippet id="snippet-manual" heading={t("embed.manual_heading")} code={manual_snippet(*source)} />
            <section class="options" aria-labelledby="options-heading">
                <h2 id="options-heading">{ t("embed.options_heading") }</h2>
                <ul>
                    <li><code>{ t("embed.option_position") }</code></li>
                    <li><code>{ t("embed.option_theme") }</code></li>
                </ul>
            </section>
            <Snippet id="snippet-destroy" heading={t("embed.destroy_heading")} code={DESTROY_SNIPPET} />
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn snippets_point_at_the_chosen_source() {
        assert_eq!(
            basic_snippet(ScriptSource::Local),
            "<script src=\"/widget.js\" data-auto-init=\"true\"></script>"
        );
        assert!(basic_snippet(ScriptSource::Cdn).contains("https://"));
        let manual = manual_snippet(ScriptSource::Local);
        assert!(manual.contains("data-auto-init=\"false\""));
        assert!(manual.contains("window.SkillblendA11y.init({"));
    }

    #[test]
    fn manual_snippet_defines_the_placeholder_before_calling_init() {
        let manual = manual_snippet(ScriptSource::Cdn);
        let placeholder = manual.find(PLACEHOLDER_SCRIPT).expect("placeholder present");
        let call = manual.find("window.SkillblendA11y.init({").expect("init call");
        let loader = manual.find("<script src=").expect("loader tag");
        assert!(placeholder < call && call < loader, "{manual}");
    }

    #[test]
    fn page_renders_every_snippet() {
        let html = block_on(LocalServerRenderer::<EmbedDocsPage>::new().render());
        assert!(html.contains("snippet-basic"));
        assert!(html.contains("snippet-manual"));
        assert!(html.contains("SkillblendA11y.destroy()"));
        assert!(html.contains("aria-pressed=\"true\""));
    }
}
