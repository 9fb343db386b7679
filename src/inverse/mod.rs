//! Inverse pipeline (HTML → Markdown)
//!
//! Converts the serialized state of the rich-text editing surface back into
//! Markdown. The rule set mirrors what the renderer emits (ATX headings,
//! `-` bullets, `*` emphasis delimiters, fenced code blocks, GFM tables,
//! strikethrough and task lists, and a two-space hard break for `<br>`)
//! so that a document which has been through the HTML stage once converges:
//! converting the emitted Markdown forward again reproduces the same HTML.
//!
//! Inline text is backslash-escaped on the way out (emphasis markers,
//! brackets, raw-HTML openers, line-leading block markers) so literal
//! punctuation survives a re-parse instead of changing meaning.
//!
//! Rule construction is the expensive part, so a converter is built once
//! and reused across calls; `convert` itself holds no mutable state.
//!
//! Unlike the render entry points, failures here propagate: silently
//! corrupting a document during a view switch is worse than a visible
//! error.

use crate::error::PipelineError;
use crate::pipeline::dom;
use markup5ever_rcdom::{Handle, NodeData};

/// Markdown output style. The defaults match what the paired renderer
/// round-trips cleanly.
#[derive(Debug, Clone)]
pub struct MarkdownRules {
    pub bullet: &'static str,
    pub emphasis: &'static str,
    pub strong: &'static str,
    pub strikethrough: &'static str,
    pub fence: &'static str,
    /// Two spaces + newline, the hard-break form common Markdown renderers
    /// expect (not the backslash form)
    pub hard_break: &'static str,
    pub thematic_break: &'static str,
}

impl Default for MarkdownRules {
    fn default() -> Self {
        MarkdownRules {
            bullet: "- ",
            emphasis: "*",
            strong: "**",
            strikethrough: "~~",
            fence: "```",
            hard_break: "  \n",
            thematic_break: "* * *",
        }
    }
}

/// Configured HTML → Markdown converter.
pub struct HtmlToMarkdown {
    rules: MarkdownRules,
}

impl HtmlToMarkdown {
    pub fn new() -> Self {
        Self {
            rules: MarkdownRules::default(),
        }
    }

    pub fn with_rules(rules: MarkdownRules) -> Self {
        Self { rules }
    }

    /// Convert an HTML string to Markdown.
    pub fn convert(&self, html: &str) -> Result<String, PipelineError> {
        let parsed = dom::parse_html(html)
            .map_err(|e| PipelineError::ConversionError(e.to_string()))?;
        let body = dom::find_body(&parsed.document)
            .ok_or_else(|| PipelineError::ConversionError("input has no body".to_string()))?;

        let blocks = self.block_strings(&body);
        let mut markdown = blocks.join("\n\n");
        if !markdown.is_empty() {
            markdown.push('\n');
        }
        Ok(markdown)
    }

    /// Render the children of `parent` as a sequence of Markdown blocks.
    /// Consecutive inline nodes form an implicit paragraph.
    fn block_strings(&self, parent: &Handle) -> Vec<String> {
        let mut blocks = Vec::new();
        let mut run = String::new();

        for child in parent.children.borrow().iter() {
            if is_block_node(child) {
                flush_run(&mut run, &mut blocks);
                if let Some(block) = self.block_markdown(child) {
                    if !block.trim().is_empty() {
                        blocks.push(block);
                    }
                }
            } else {
                self.inline_node(child, &mut run, InlineCtx::default());
            }
        }
        flush_run(&mut run, &mut blocks);
        blocks
    }

    fn block_markdown(&self, node: &Handle) -> Option<String> {
        let tag = tag_of(node)?;
        match tag.as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = (tag.as_bytes()[1] - b'0') as usize;
                let text = self.inline_string(node, InlineCtx::default());
                let text = text.trim();
                if text.is_empty() {
                    return None;
                }
                Some(format!("{} {}", "#".repeat(level), text))
            }
            "p" | "figcaption" | "dt" => {
                let text = self.inline_string(node, InlineCtx::default());
                let text = text.trim();
                if text.is_empty() {
                    return None;
                }
                Some(escape_block_starts(text))
            }
            "hr" => Some(self.rules.thematic_break.to_string()),
            "pre" => Some(self.code_block_markdown(node)),
            "blockquote" => {
                let inner = self.block_strings(node).join("\n\n");
                if inner.is_empty() {
                    return None;
                }
                let prefixed: Vec<String> = inner
                    .lines()
                    .map(|line| {
                        if line.is_empty() {
                            ">".to_string()
                        } else {
                            format!("> {line}")
                        }
                    })
                    .collect();
                Some(prefixed.join("\n"))
            }
            "ul" => Some(self.list_markdown(node, false)),
            "ol" => Some(self.list_markdown(node, true)),
            "table" => self.table_markdown(node),
            "studio-card" | "studio-chart" | "studio-component" => {
                self.widget_markdown(node, &tag)
            }
            // Transparent containers: render their children as blocks
            _ => {
                let inner = self.block_strings(node);
                if inner.is_empty() {
                    None
                } else {
                    Some(inner.join("\n\n"))
                }
            }
        }
    }

    fn code_block_markdown(&self, pre: &Handle) -> String {
        let code_child = pre
            .children
            .borrow()
            .iter()
            .find(|child| tag_of(child).as_deref() == Some("code"))
            .cloned();

        let language = code_child
            .as_ref()
            .and_then(|code| dom::attribute(code, "class"))
            .and_then(|class| {
                class
                    .split_whitespace()
                    .find_map(|c| c.strip_prefix("language-").map(str::to_string))
            })
            .unwrap_or_default();

        let content_node = code_child.unwrap_or_else(|| pre.clone());
        let mut content = dom::text_content(&content_node);
        if content.ends_with('\n') {
            content.pop();
        }

        let fence = self.grow_fence(&content);
        if content.is_empty() {
            format!("{fence}{language}\n{fence}")
        } else {
            format!("{fence}{language}\n{content}\n{fence}")
        }
    }

    fn list_markdown(&self, list: &Handle, ordered: bool) -> String {
        let start: u64 = dom::attribute(list, "start")
            .and_then(|value| value.parse().ok())
            .unwrap_or(1);

        let items: Vec<Handle> = list
            .children
            .borrow()
            .iter()
            .filter(|child| tag_of(child).as_deref() == Some("li"))
            .cloned()
            .collect();

        let loose = items.iter().any(has_paragraph_child);

        let mut rendered = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let marker = if ordered {
                format!("{}. ", start + index as u64)
            } else {
                self.rules.bullet.to_string()
            };

            let mut line = marker.clone();
            if let Some(task) = task_prefix(item) {
                line.push_str(task);
            }

            let separator = if has_paragraph_child(item) { "\n\n" } else { "\n" };
            let content = self.item_blocks(item).join(separator);

            let indent = " ".repeat(marker.len());
            for (line_index, content_line) in content.lines().enumerate() {
                if line_index == 0 {
                    line.push_str(content_line);
                } else {
                    line.push('\n');
                    if !content_line.is_empty() {
                        line.push_str(&indent);
                        line.push_str(content_line);
                    }
                }
            }
            rendered.push(line);
        }

        rendered.join(if loose { "\n\n" } else { "\n" })
    }

    /// Blocks of a list item, with task-list checkboxes already consumed by
    /// [`task_prefix`] and therefore skipped here.
    fn item_blocks(&self, li: &Handle) -> Vec<String> {
        self.block_strings(li)
    }

    fn table_markdown(&self, table: &Handle) -> Option<String> {
        let rows = collect_rows(table);
        if rows.is_empty() {
            return None;
        }

        let header_cells = self.row_cells(&rows[0]);
        if header_cells.is_empty() {
            return None;
        }

        let separators: Vec<String> = rows[0]
            .children
            .borrow()
            .iter()
            .filter(|child| matches!(tag_of(child).as_deref(), Some("th") | Some("td")))
            .map(|cell| match dom::attribute(cell, "align").as_deref() {
                Some("left") => ":---".to_string(),
                Some("center") => ":---:".to_string(),
                Some("right") => "---:".to_string(),
                _ => "---".to_string(),
            })
            .collect();

        let mut lines = Vec::with_capacity(rows.len() + 1);
        lines.push(format!("| {} |", header_cells.join(" | ")));
        lines.push(format!("| {} |", separators.join(" | ")));
        for row in &rows[1..] {
            lines.push(format!("| {} |", self.row_cells(row).join(" | ")));
        }
        Some(lines.join("\n"))
    }

    fn row_cells(&self, row: &Handle) -> Vec<String> {
        row.children
            .borrow()
            .iter()
            .filter(|child| matches!(tag_of(child).as_deref(), Some("th") | Some("td")))
            .map(|cell| {
                self.inline_string(cell, InlineCtx { in_table: true })
                    .trim()
                    .to_string()
            })
            .collect()
    }

    /// Map a widget marker element back to its fenced-block source form so
    /// widgets survive editor round-trips.
    fn widget_markdown(&self, node: &Handle, tag: &str) -> Option<String> {
        let json = dom::attribute(node, "data-json")?;
        let token = match tag {
            "studio-card" => "card".to_string(),
            "studio-chart" => "chart".to_string(),
            "studio-component" => format!("component:{}", dom::attribute(node, "data-type")?),
            _ => return None,
        };

        let fence = self.grow_fence(&json);
        if json.contains('\n') || json.contains('`') {
            // Fence info strings cannot hold backticks or newlines; fall
            // back to the in-body token form
            Some(format!("{fence}\n{token} {json}\n{fence}"))
        } else {
            Some(format!("{fence}{token} {json}\n{fence}"))
        }
    }

    fn grow_fence(&self, content: &str) -> String {
        let mut fence = self.rules.fence.to_string();
        while content.contains(&fence) {
            fence.push('`');
        }
        fence
    }

    fn inline_string(&self, parent: &Handle, ctx: InlineCtx) -> String {
        let mut out = String::new();
        self.inline_children(parent, &mut out, ctx);
        out
    }

    fn inline_children(&self, parent: &Handle, out: &mut String, ctx: InlineCtx) {
        for child in parent.children.borrow().iter() {
            self.inline_node(child, out, ctx);
        }
    }

    fn inline_node(&self, node: &Handle, out: &mut String, ctx: InlineCtx) {
        match &node.data {
            NodeData::Text { contents } => push_text(&contents.borrow(), out, ctx),
            NodeData::Element { name, .. } => {
                let tag = name.local.as_ref().to_ascii_lowercase();
                match tag.as_str() {
                    "br" => {
                        if ctx.in_table {
                            if !out.is_empty() && !out.ends_with(' ') {
                                out.push(' ');
                            }
                        } else if !out.is_empty() {
                            while out.ends_with(' ') {
                                out.pop();
                            }
                            out.push_str(self.rules.hard_break);
                        }
                    }
                    "strong" | "b" => self.wrap_inline(node, out, ctx, self.rules.strong),
                    "em" | "i" => self.wrap_inline(node, out, ctx, self.rules.emphasis),
                    "del" | "s" | "strike" => {
                        self.wrap_inline(node, out, ctx, self.rules.strikethrough)
                    }
                    "code" => self.inline_code(node, out),
                    "a" => self.anchor(node, out, ctx),
                    "img" => image(node, out),
                    // Task-list checkboxes are consumed by the list writer
                    "input" => {}
                    // span, sup, sub and anything else inline: transparent
                    _ => self.inline_children(node, out, ctx),
                }
            }
            _ => {}
        }
    }

    fn wrap_inline(&self, node: &Handle, out: &mut String, ctx: InlineCtx, delimiter: &str) {
        let inner = self.inline_string(node, ctx);
        let trimmed = inner.trim();
        if trimmed.is_empty() {
            return;
        }
        out.push_str(delimiter);
        out.push_str(trimmed);
        out.push_str(delimiter);
    }

    fn inline_code(&self, node: &Handle, out: &mut String) {
        let content = dom::text_content(node).replace('\n', " ");
        if content.is_empty() {
            return;
        }
        let longest_run = longest_backtick_run(&content);
        if longest_run == 0 {
            out.push('`');
            out.push_str(&content);
            out.push('`');
        } else {
            let delimiter = "`".repeat(longest_run + 1);
            out.push_str(&delimiter);
            out.push(' ');
            out.push_str(&content);
            out.push(' ');
            out.push_str(&delimiter);
        }
    }

    fn anchor(&self, node: &Handle, out: &mut String, ctx: InlineCtx) {
        let href = dom::attribute(node, "href").unwrap_or_default();
        if href.is_empty() {
            self.inline_children(node, out, ctx);
            return;
        }

        let raw_text = collapse_whitespace(&dom::text_content(node));
        let raw_text = raw_text.trim();
        if raw_text == href || format!("mailto:{raw_text}") == href {
            out.push('<');
            out.push_str(raw_text);
            out.push('>');
            return;
        }

        let inner = self.inline_string(node, ctx);
        let destination = if href.contains([' ', '(', ')']) {
            format!("<{href}>")
        } else {
            href
        };
        match dom::attribute(node, "title") {
            Some(title) => out.push_str(&format!(
                "[{}]({} \"{}\")",
                inner.trim(),
                destination,
                title.replace('"', "\\\"")
            )),
            None => out.push_str(&format!("[{}]({})", inner.trim(), destination)),
        }
    }
}

impl Default for HtmlToMarkdown {
    fn default() -> Self {
        HtmlToMarkdown::new()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct InlineCtx {
    in_table: bool,
}

fn image(node: &Handle, out: &mut String) {
    let Some(src) = dom::attribute(node, "src") else {
        return;
    };
    let alt = dom::attribute(node, "alt")
        .unwrap_or_default()
        .replace('[', "\\[")
        .replace(']', "\\]");
    let destination = if src.contains([' ', '(', ')']) {
        format!("<{src}>")
    } else {
        src
    };
    match dom::attribute(node, "title") {
        Some(title) => out.push_str(&format!(
            "![{alt}]({destination} \"{}\")",
            title.replace('"', "\\\"")
        )),
        None => out.push_str(&format!("![{alt}]({destination})")),
    }
}

fn flush_run(run: &mut String, blocks: &mut Vec<String>) {
    let text = run.trim().to_string();
    run.clear();
    if !text.is_empty() {
        blocks.push(escape_block_starts(&text));
    }
}

fn tag_of(node: &Handle) -> Option<String> {
    if let NodeData::Element { name, .. } = &node.data {
        Some(name.local.as_ref().to_ascii_lowercase())
    } else {
        None
    }
}

fn is_block_node(node: &Handle) -> bool {
    matches!(
        tag_of(node).as_deref(),
        Some(
            "h1" | "h2"
                | "h3"
                | "h4"
                | "h5"
                | "h6"
                | "p"
                | "pre"
                | "blockquote"
                | "ul"
                | "ol"
                | "table"
                | "hr"
                | "div"
                | "section"
                | "article"
                | "header"
                | "footer"
                | "main"
                | "figure"
                | "figcaption"
                | "dl"
                | "dt"
                | "dd"
                | "studio-card"
                | "studio-chart"
                | "studio-component"
        )
    )
}

fn has_paragraph_child(li: &Handle) -> bool {
    li.children
        .borrow()
        .iter()
        .any(|child| tag_of(child).as_deref() == Some("p"))
}

/// `- [x] ` / `- [ ] ` prefix when the item starts with a checkbox input.
fn task_prefix(li: &Handle) -> Option<&'static str> {
    let first_element = li
        .children
        .borrow()
        .iter()
        .find(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned()?;

    if tag_of(&first_element).as_deref() != Some("input") {
        return None;
    }
    if dom::attribute(&first_element, "type").as_deref() != Some("checkbox") {
        return None;
    }
    if dom::attribute(&first_element, "checked").is_some() {
        Some("[x] ")
    } else {
        Some("[ ] ")
    }
}

fn collect_rows(table: &Handle) -> Vec<Handle> {
    let mut rows = Vec::new();
    for child in table.children.borrow().iter() {
        match tag_of(child).as_deref() {
            Some("tr") => rows.push(child.clone()),
            Some("thead") | Some("tbody") => {
                for inner in child.children.borrow().iter() {
                    if tag_of(inner).as_deref() == Some("tr") {
                        rows.push(inner.clone());
                    }
                }
            }
            _ => {}
        }
    }
    rows
}

/// Append a text node's content, collapsing whitespace runs and escaping
/// Markdown punctuation so the text re-parses as the same literal text.
fn push_text(text: &str, out: &mut String, ctx: InlineCtx) {
    let mut collapsed = String::with_capacity(text.len());
    let mut last_was_space = out.is_empty() || out.ends_with([' ', '\n']);
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                collapsed.push(' ');
                last_was_space = true;
            }
        } else {
            collapsed.push(ch);
            last_was_space = false;
        }
    }
    out.push_str(&escape_inline(&collapsed, ctx.in_table));
}

fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for ch in text.chars() {
        if ch == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut last_was_space = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                collapsed.push(' ');
                last_was_space = true;
            }
        } else {
            collapsed.push(ch);
            last_was_space = false;
        }
    }
    collapsed
}

fn escape_inline(text: &str, in_table: bool) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &ch) in chars.iter().enumerate() {
        match ch {
            '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '&' => {
                out.push('\\');
                out.push(ch);
            }
            '~' if chars.get(i + 1) == Some(&'~') || (i > 0 && chars[i - 1] == '~') => {
                out.push('\\');
                out.push(ch);
            }
            '|' if in_table => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Escape characters that would start a different block construct at the
/// beginning of a paragraph line.
fn escape_block_starts(text: &str) -> String {
    let lines: Vec<String> = text.lines().map(escape_line_start).collect();
    lines.join("\n")
}

fn escape_line_start(line: &str) -> String {
    let bytes = line.as_bytes();
    let Some(&first) = bytes.first() else {
        return String::new();
    };
    let second_is_space_or_end = bytes.len() == 1 || bytes[1] == b' ';

    match first {
        b'>' | b'#' => return format!("\\{line}"),
        b'-' if second_is_space_or_end || bytes.iter().all(|&b| b == b'-') => {
            return format!("\\{line}");
        }
        b'+' if second_is_space_or_end => return format!("\\{line}"),
        b'=' if bytes.iter().all(|&b| b == b'=') => return format!("\\{line}"),
        b'0'..=b'9' => {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            if digits <= 9 {
                let rest = &line[digits..];
                if (rest.starts_with('.') || rest.starts_with(')'))
                    && matches!(rest.as_bytes().get(1), None | Some(&b' '))
                {
                    return format!("{}\\{}", &line[..digits], rest);
                }
            }
        }
        _ => {}
    }
    line.to_string()
}
