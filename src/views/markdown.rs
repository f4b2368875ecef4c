use comrak::plugins::syntect::SyntectAdapter;
use comrak::{ComrakOptions, ComrakPlugins, markdown_to_html_with_plugins};
use once_cell::sync::Lazy;

static MARKDOWN_OPTIONS: Lazy<ComrakOptions> = Lazy::new(|| {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    // Model output is untrusted; raw HTML stays escaped.
    options.render.unsafe_ = false;
    options
});

pub fn markdown_to_html(md: &str) -> String {
    let adapter = SyntectAdapter::new(Some("base16-ocean.dark"));
    let mut plugins = ComrakPlugins::default();
    plugins.render.codefence_syntax_highlighter = Some(&adapter);
    markdown_to_html_with_plugins(md, &MARKDOWN_OPTIONS, &plugins)
}
