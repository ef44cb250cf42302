// prose-bridge/bridge-markup
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::thread;

use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use bridge_markup::{
    html_to_xhtml, TranscodeError, XhtmlConverter, XhtmlPolicy, XHTML_IM_NS, XHTML_NS,
};

fn envelope(body: &str) -> String {
    format!(
        "<html xmlns='{}'><body xmlns='{}'>{}</body></html>",
        XHTML_IM_NS, XHTML_NS, body
    )
}

#[test]
fn test_compliant_message_is_unchanged() {
    let xhtml = "<html xmlns='http://jabber.org/protocol/xhtml-im'><body xmlns='http://www.w3.org/1999/xhtml'><p>Hello world</p></body></html>";
    assert_eq!(xhtml, html_to_xhtml(xhtml));
}

#[test]
fn test_plain_text() {
    assert_eq!(envelope("o/"), html_to_xhtml("o/"));
    assert_eq!(envelope(""), html_to_xhtml(""));
}

#[test]
fn test_link() {
    assert_eq!(
        envelope("<a href='https://matrix.to/#/@bob:matrix.org'>bob</a>: Huzzah!"),
        html_to_xhtml(r#"<a href="https://matrix.to/#/@bob:matrix.org">bob</a>: Huzzah!"#)
    );
}

#[test]
fn test_reply_fallback() {
    let html = concat!(
        r#"<mx-reply><blockquote><a href="https://matrix.to/#/!ruaviCwHdJSWfKcBam:half-shot.uk/"#,
        r#"$1548685877554RlePg:half-shot.uk?via=half-shot.uk&via=matrix.org&via=t2bot.io">In reply to</a>"#,
        r#"<a href="https://matrix.to/#/@Half-Shot:half-shot.uk">"#,
        r#"@Half-Shot:half-shot.uk</a><br>This is the first message</blockquote></mx-reply>"#,
        "And this is a reply",
    );

    assert_eq!(
        envelope(concat!(
            "<blockquote><a href='https://matrix.to/#/!ruaviCwHdJSWfKcBam:half-shot.uk/$1548685877554RlePg:half-shot.uk?via=half-shot.uk&amp;",
            "via=matrix.org&amp;via=t2bot.io'>In reply to</a><a href='https://matrix.to/#/@Half-Shot:half-shot.uk'>@Half-Shot:half-shot.uk</a>",
            "<br>This is the first message</br></blockquote>And this is a reply",
        )),
        html_to_xhtml(html)
    );
}

#[test]
fn test_inline_image() {
    assert_eq!(
        envelope(concat!(
            "Here is a pretty image<span class='d-emoji'>",
            "<img alt='shadow' title='shadow' height='32' src='http://foobar.com'></img></span>"
        )),
        html_to_xhtml(
            r#"Here is a pretty image<span class="d-emoji"><img alt="shadow" title="shadow" height="32" src="http://foobar.com" /></span>"#
        )
    );
}

#[test]
fn test_full_document() {
    let html = r#"<!DOCTYPE html><html><head><title>Message</title><style>b { color: red }</style></head><body><p>Hi <B>there</B><!-- tracking --></p><script>alert(1)</script></body></html>"#;

    assert_snapshot!(html_to_xhtml(html), @"<html xmlns='http://jabber.org/protocol/xhtml-im'><body xmlns='http://www.w3.org/1999/xhtml'><p>Hi <b>there</b></p></body></html>");
}

#[test]
fn test_formatting_and_lists() {
    let html = "<p><strong>Agenda</strong></p><ol><li>Intro<li>Q&amp;A</ol><pre><code>fn main() {}</code></pre>";

    assert_snapshot!(html_to_xhtml(html), @"<html xmlns='http://jabber.org/protocol/xhtml-im'><body xmlns='http://www.w3.org/1999/xhtml'><p><strong>Agenda</strong></p><ol><li>Intro<li>Q&amp;A</li></li></ol><pre><code>fn main() {}</code></pre></body></html>");
}

#[test]
fn test_malformed_input_is_still_well_formed() {
    assert_eq!(
        envelope("<b>bold <i>both</i></b>tail"),
        html_to_xhtml("<b>bold <i>both</b>tail</i></p>")
    );
    assert_eq!(envelope("<em>open</em>"), html_to_xhtml("<em>open"));
    assert_eq!(
        envelope("1 &lt; 2 &lt;b class='x"),
        html_to_xhtml("1 < 2 <b class='x")
    );
}

#[test]
fn test_unsafe_attributes_are_dropped() {
    assert_eq!(
        envelope("<a href='https://prose.org'>click</a><img src='x.png'></img>"),
        html_to_xhtml(
            r#"<a href="https://prose.org" onclick="steal()" target=_blank>click</a><img src=x.png onerror="steal()">"#
        )
    );
}

#[test]
fn test_characters_outside_xml_are_removed() {
    assert_eq!(envelope("a&amp;#1;bc"), html_to_xhtml("a&#1;b\u{0}c"));
    assert_eq!(
        envelope("<b title='xy'>line\nbreak</b>"),
        html_to_xhtml("<b title='x\u{7}y'>line\n\u{1b}break\u{fffe}</b>")
    );

    let converter = XhtmlConverter::new(XhtmlPolicy {
        max_depth: 0,
        ..Default::default()
    });
    assert_eq!(envelope("&lt;b&gt;\tx"), converter.convert("<b>\u{0}\tx"));
}

#[test]
fn test_script_links_are_neutralized() {
    assert_eq!(
        envelope("<a>click</a> <a href='xmpp:room@conf.prose.org?join'>join</a> <img alt='x'></img>"),
        html_to_xhtml(concat!(
            r#"<a href="  JavaScript:alert(document.cookie)">click</a> "#,
            r#"<a href="xmpp:room@conf.prose.org?join">join</a> "#,
            r#"<img src="vbscript:msgbox(1)" alt="x"/>"#,
        ))
    );
}

#[test]
fn test_entities() {
    assert_eq!(
        envelope("Caf\u{e9} &amp; cr\u{e8}me &lt;3 \u{2014} \u{a0}"),
        html_to_xhtml("Caf&eacute; &amp; cr&#232;me &lt;3 &mdash; &nbsp;")
    );
}

#[test]
fn test_custom_policy_from_json() -> Result<()> {
    let policy: XhtmlPolicy = serde_json::from_str(
        r#"{
            "tags": { "b": [], "a": ["href"] },
            "global_attributes": [],
            "stripped_tags": ["blockquote"]
        }"#,
    )?;
    assert_eq!(XhtmlPolicy::default().max_depth, policy.max_depth);

    let converter = XhtmlConverter::new(policy);
    assert_eq!(
        envelope("Reply: <b>yes</b> <a href='https://prose.org'>link</a>"),
        converter.try_convert(
            r#"<blockquote>Quoted</blockquote>Reply: <b class="x">yes</b> <em><a href="https://prose.org" title="t">link</a></em>"#
        )?
    );

    Ok(())
}

#[test]
fn test_nesting_limit_falls_back_to_text() {
    let converter = XhtmlConverter::new(XhtmlPolicy {
        max_depth: 1,
        ..Default::default()
    });

    assert_eq!(
        Err(TranscodeError::NestingTooDeep { limit: 1 }),
        converter.try_convert("<p><b>deep</b></p>")
    );
    assert_eq!(
        envelope("&lt;p&gt;&lt;b&gt;deep&lt;/b&gt;&lt;/p&gt;"),
        converter.convert("<p><b>deep</b></p>")
    );
}

#[test]
fn test_converts_from_multiple_threads() {
    let converter = XhtmlConverter::default();

    thread::scope(|scope| {
        let handles = (0..8)
            .map(|idx| {
                let converter = &converter;
                scope.spawn(move || converter.convert(&format!("<b>message {idx}</b>")))
            })
            .collect::<Vec<_>>();

        for (idx, handle) in handles.into_iter().enumerate() {
            assert_eq!(
                envelope(&format!("<b>message {idx}</b>")),
                handle.join().expect("thread panicked")
            );
        }
    });
}
