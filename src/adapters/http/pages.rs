//! Páginas HTML generadas para el flujo de formulario (`POST /upload`).
//! Las páginas estáticas viven en `static/`; aquí solo está el resultado de una inspección.

use crate::application::dto::InspectionResponse;
use crate::domain::palette;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<link rel=\"stylesheet\" href=\"/css/style.css\">\n</head>\n\
         <body>\n<nav><a href=\"/\">Home</a> <a href=\"/demo.html\">Demo</a> \
         <a href=\"/about.html\">About</a> <a href=\"/team.html\">Team</a></nav>\n\
         <main>\n{}\n</main>\n</body>\n</html>\n",
        escape(title),
        body
    )
}

pub fn render_result(res: &InspectionResponse) -> String {
    let mut body = String::new();
    body.push_str("<h1>Detection result</h1>\n");
    body.push_str(&format!(
        "<img class=\"result\" src=\"{}\" alt=\"{}\">\n",
        escape(&res.result_url),
        escape(&res.filename)
    ));

    if !res.summary.is_empty() {
        body.push_str(&format!("<p class=\"summary\">Detected: {}</p>\n", escape(&res.summary)));
    }

    if res.compliant {
        body.push_str("<p class=\"status ok\">No PPE issues flagged.</p>\n");
    } else {
        body.push_str("<ul class=\"status\">\n");
        for line in res.message.lines() {
            body.push_str(&format!("<li>{}</li>\n", escape(line)));
        }
        body.push_str("</ul>\n");
    }

    if !res.detections.is_empty() {
        body.push_str("<table class=\"detections\">\n<tr><th>Label</th><th>Confidence</th></tr>\n");
        for det in &res.detections {
            body.push_str(&format!(
                "<tr><td style=\"color:{}\">{}</td><td>{:.2}</td></tr>\n",
                palette::to_hex(palette::color_for(&det.class_label)),
                escape(&det.class_label),
                det.confidence
            ));
        }
        body.push_str("</table>\n");
    }

    body.push_str("<p><a href=\"/demo.html\">Try another image</a></p>");
    layout("Detection result", &body)
}

pub fn render_error(title: &str, detail: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<p class=\"error\">{}</p>\n<p><a href=\"/demo.html\">Back</a></p>",
        escape(title),
        escape(detail)
    );
    layout(title, &body)
}
