use std::fmt::Write;

use genai_client::{ChatCompletionResponse, CompletionResponse, ImageResponse, Usage};

/// Human-readable rendering of a scenario's success value.
pub trait Render: Send {
    fn render(&self) -> String;
}

impl Render for String {
    fn render(&self) -> String {
        self.clone()
    }
}

fn header(out: &mut String, id: &str, model: &str, created: i64) {
    let _ = writeln!(out, "id: {}  model: {}  created: {}", id, model, created);
}

fn usage(out: &mut String, usage: Option<&Usage>) {
    if let Some(u) = usage {
        let _ = writeln!(
            out,
            "usage: prompt={} completion={} total={}",
            u.prompt_tokens, u.completion_tokens, u.total_tokens
        );
    }
}

impl Render for CompletionResponse {
    fn render(&self) -> String {
        let mut out = String::new();
        header(&mut out, &self.id, &self.model, self.created);
        for choice in &self.choices {
            let _ = writeln!(
                out,
                "[{}] {:?} ({})",
                choice.index,
                choice.text,
                choice.finish_reason.as_deref().unwrap_or("-")
            );
        }
        usage(&mut out, self.usage.as_ref());
        out.trim_end().to_string()
    }
}

impl Render for ChatCompletionResponse {
    fn render(&self) -> String {
        let mut out = String::new();
        header(&mut out, &self.id, &self.model, self.created);
        for choice in &self.choices {
            let _ = writeln!(
                out,
                "[{}] {:?}: {:?} ({})",
                choice.index,
                choice.message.role,
                choice.message.content,
                choice.finish_reason.as_deref().unwrap_or("-")
            );
        }
        usage(&mut out, self.usage.as_ref());
        out.trim_end().to_string()
    }
}

impl Render for ImageResponse {
    fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "created: {}  images: {}", self.created, self.data.len());
        for (idx, image) in self.data.iter().enumerate() {
            match (&image.url, &image.b64_json) {
                (Some(url), _) => {
                    let _ = writeln!(out, "[{}] {}", idx, url);
                }
                (None, Some(b64)) => {
                    let _ = writeln!(out, "[{}] <b64_json, {} chars>", idx, b64.len());
                }
                (None, None) => {
                    let _ = writeln!(out, "[{}] <empty>", idx);
                }
            }
        }
        out.trim_end().to_string()
    }
}
