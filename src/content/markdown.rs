//! Markdown rendering with heading anchors and syntax highlighting

use pulldown_cmark::{
    html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::page::heading_text_at;
use crate::config::HighlightConfig;
use crate::helpers::{anchor_id, html_escape, is_absolute_link};

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    highlight: bool,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options(&HighlightConfig::default())
    }

    /// Create with custom highlight settings
    pub fn with_options(config: &HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: config.theme.clone(),
            highlight: config.enable,
            line_numbers: config.line_number,
        }
    }

    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_DEFINITION_LIST
            | Options::ENABLE_GFM
    }

    /// Render markdown to HTML.
    ///
    /// Every heading gets an ID from [`anchor_id`]. A `## ` heading takes it
    /// from its source line, the same text the sidebar links are built from;
    /// other headings use their rendered text. Links leaving the site open in
    /// a new tab.
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Self::options()).into_offset_iter();

        let mut events: Vec<Event> = Vec::new();

        // Index of the open heading's start event, plus its plain text
        let mut heading: Option<(usize, String)> = None;
        // One entry per open link: whether its start tag was rewritten
        let mut links: Vec<bool> = Vec::new();

        let mut code_block: Option<Option<String>> = None;
        let mut code_block_content = String::new();

        for (event, range) in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) if self.highlight => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block = Some(lang);
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) if code_block.is_some() => {
                    let lang = code_block.take().flatten();
                    let highlighted = self.highlight_code(&code_block_content, lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                }
                Event::Text(text) if code_block.is_some() => {
                    code_block_content.push_str(&text);
                }

                Event::Start(Tag::Heading {
                    level,
                    classes,
                    attrs,
                    ..
                }) => {
                    let id = match level {
                        HeadingLevel::H2 => source_heading(markdown, range.start)
                            .map(|text| CowStr::from(anchor_id(text))),
                        _ => None,
                    };
                    heading = Some((events.len(), String::new()));
                    events.push(Event::Start(Tag::Heading {
                        level,
                        id,
                        classes,
                        attrs,
                    }));
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((index, text)) = heading.take() {
                        if let Event::Start(Tag::Heading { id, .. }) = &mut events[index] {
                            if id.is_none() {
                                *id = Some(CowStr::from(anchor_id(&text)));
                            }
                        }
                    }
                    events.push(event);
                }
                Event::Text(ref text) | Event::Code(ref text) if heading.is_some() => {
                    if let Some((_, buf)) = heading.as_mut() {
                        buf.push_str(text);
                    }
                    events.push(event);
                }

                Event::Start(Tag::Link {
                    ref dest_url,
                    ref title,
                    ..
                }) if is_absolute_link(dest_url) => {
                    let title_attr = if title.is_empty() {
                        String::new()
                    } else {
                        format!(r#" title="{}""#, html_escape(title))
                    };
                    let tag = format!(
                        r#"<a href="{}"{} target="_blank" rel="noopener">"#,
                        html_escape(dest_url),
                        title_attr
                    );
                    links.push(true);
                    events.push(Event::InlineHtml(CowStr::from(tag)));
                }
                Event::Start(Tag::Link { .. }) => {
                    links.push(false);
                    events.push(event);
                }
                Event::End(TagEnd::Link) => {
                    if links.pop().unwrap_or(false) {
                        events.push(Event::InlineHtml(CowStr::Borrowed("</a>")));
                    } else {
                        events.push(event);
                    }
                }

                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) if self.line_numbers => self.add_line_numbers(&highlighted, lang),
            Some(highlighted) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                lang, highlighted
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();

        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
            lang,
            gutter,
            lines.join("\n")
        )
    }
}

/// Raw `## ` heading text on the line containing byte `offset`
fn source_heading(markdown: &str, offset: usize) -> Option<&str> {
    let line_start = markdown[..offset].rfind('\n').map_or(0, |i| i + 1);
    heading_text_at(&markdown[line_start..])
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
