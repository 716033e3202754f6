// autolink-core/tests/service_integration_tests.rs
use anyhow::Result;
use test_log::test; // Captures `log` output of the library in tests

use autolink_core::{
    AutoLinkService, AutolinkConfig, Detector, EmailDetector, Linked, MentionDetector, Node, OutputTarget, Text,
    UrlDetector,
};

fn default_service() -> Result<AutoLinkService> {
    Ok(AutoLinkService::from_config(&AutolinkConfig::load_default()?)?)
}

#[test]
fn links_urls_and_email_addresses_in_one_pass() -> Result<()> {
    let service = default_service()?;
    let linked = service.add_links(Some("see https://example.com or mail me@example.com"), None);
    assert_eq!(
        linked.as_deref(),
        Some(
            "see <a href=\"https://example.com\" title=\"https://example.com\">example.com</a> or mail \
             <a href=\"mailto:%6d%65@%65%78%61%6d%70%6c%65%2e%63%6f%6d\">me [AT] example [DOT] com</a>"
        )
    );
    Ok(())
}

#[test]
fn linking_is_idempotent() -> Result<()> {
    let service = default_service()?;
    let inputs = [
        "see https://example.com or mail me@example.com",
        "<p>ping @rotnroll666 about dailyfratze.de/app/tags/CoStarring/Anton#taggedPictures</p>",
        "<ul><li>twitter.com</li><li>no links here</li></ul>",
    ];
    for input in inputs {
        let once = service.add_links(Some(input), None);
        let twice = service.add_links(once.as_deref(), None);
        assert_eq!(once, twice, "second pass changed the output of {:?}", input);
    }
    Ok(())
}

#[test]
fn markup_without_links_is_preserved() -> Result<()> {
    let service = default_service()?;
    let html = "<p>Einfach </p><form><input type=\"text\" /><div><p>das <!-- das ist ein kommentar --> ist ein test.</p></div></form><p> nur so ein Text</p>";
    assert_eq!(service.add_links(Some(html), None).as_deref(), Some(html));
    Ok(())
}

#[test]
fn existing_anchors_are_left_alone() -> Result<()> {
    let service = default_service()?;
    let html = "<p>Visit <a href=\"http://heise.de\">heise.de</a> or write to <a href=\"mailto:me@example.com\">me@example.com</a>.</p>";
    assert_eq!(service.add_links(Some(html), None).as_deref(), Some(html));
    Ok(())
}

#[test]
fn email_detector_runs_before_mentions_and_urls() -> Result<()> {
    let service = AutoLinkService::new(vec![
        Box::new(EmailDetector::new(false, false)),
        Box::new(MentionDetector::default()),
        Box::new(UrlDetector::default()),
    ]);
    let linked = service.add_links(Some("Kontakt: michael.simons@test.com"), None);
    assert_eq!(
        linked.as_deref(),
        Some("Kontakt: <a href=\"mailto:michael.simons@test.com\">michael.simons@test.com</a>")
    );
    Ok(())
}

/// Rebuilds `input` from the nodes `detector` splits it into, putting the
/// matched source text back in place of every anchor.
fn rejoin_matched_text(detector: &dyn Detector, input: &str) -> String {
    let matches = detector.find_matches(input);
    for m in &matches {
        assert_eq!(&input[m.start..m.end], m.matched, "span and matched text differ in {:?}", input);
    }

    let mut rejoined = String::new();
    let mut anchors = matches.iter();
    for node in detector.create_links(&Text::new(input, "")) {
        match node {
            Node::Text(text) => rejoined.push_str(text.content()),
            Node::Element(_) => rejoined.push_str(&anchors.next().expect("an anchor per match").matched),
            Node::Other(_) => panic!("detectors only produce text and anchors"),
        }
    }
    assert!(anchors.next().is_none(), "fewer anchors than matches in {:?}", input);
    rejoined
}

#[test]
fn url_detector_preserves_surrounding_text() {
    let detector = UrlDetector::default();
    let inputs = [
        "see https://example.com/a?b=c, www.heise.de and dailyfratze.de/app/tags/CoStarring/Anton#taggedPictures.",
        "(http://en.wikipedia.org/wiki/Primer_(film)) and \"twitter.com\"",
        "go www\u{A0}example.com or Gr\u{fc}\u{df}e.de:8080/x!",
        "no links at all",
        "a.b.c.de-f.gh http://x.io/ y",
    ];
    for input in inputs {
        assert_eq!(rejoin_matched_text(&detector, input), input);
    }
}

#[test]
fn mention_detector_preserves_surrounding_text() {
    let detector = MentionDetector::default();
    let inputs = [
        "RT:@rotnroll666 hi @foo@bar.com and @abcdefghijklmnopqrstuvwxyz!",
        "(@one), @two. @three\u{e9} @http://example.com",
        "mail michael@test.com or @rotnroll666\n@next",
    ];
    for input in inputs {
        assert_eq!(rejoin_matched_text(&detector, input), input);
    }
}

#[test]
fn plain_email_detector_preserves_surrounding_text() {
    let detector = EmailDetector::new(false, false);
    let inputs = [
        "mail me@example.com, or a@b.de",
        "x(a@b.de y@z.de \"john doe\"@example.com",
        "Kontakt: michael.simons@test.com\tund m\u{fc}ller@test.de",
    ];
    for input in inputs {
        let joined: String = detector
            .create_links(&Text::new(input, ""))
            .iter()
            .map(Node::text)
            .collect();
        assert_eq!(joined, input);
    }
}

#[test]
fn url_detector_first_links_the_local_part_of_addresses() -> Result<()> {
    let input = "mail michael.simons@test.com or @rotnroll666 at twitter.com";
    let simons = "<a href=\"http://michael.simons\" title=\"http://michael.simons\">michael.simons</a>";
    let twitter = "<a href=\"http://twitter.com\" title=\"http://twitter.com\">twitter.com</a>";

    let urls_only = AutoLinkService::new(vec![Box::new(UrlDetector::default())]).add_links(Some(input), None);
    assert_eq!(
        urls_only.as_deref(),
        Some(format!("mail {simons}@test.com or @rotnroll666 at {twitter}").as_str())
    );

    let service = AutoLinkService::new(vec![
        Box::new(UrlDetector::default()),
        Box::new(EmailDetector::default()),
        Box::new(MentionDetector::default()),
    ]);
    let linked = service.add_links(Some(input), None);
    assert_eq!(
        linked.as_deref(),
        Some(
            format!(
                "mail {simons}<a href=\"https://twitter.com/test\">@test</a>.com or \
                 <a href=\"https://twitter.com/rotnroll666\">@rotnroll666</a> at {twitter}"
            )
            .as_str()
        )
    );

    // The anchors of the url pass come out of the later passes unchanged.
    let Linked::Document(document) = service.add_links_to(Some(input), None, OutputTarget::Document)? else {
        panic!("expected a document");
    };
    let hrefs: Vec<_> = document
        .body()
        .children()
        .iter()
        .filter_map(Node::as_element)
        .map(|a| (a.attr("href").unwrap_or_default().to_string(), a.text()))
        .collect();
    assert_eq!(
        hrefs,
        vec![
            ("http://michael.simons".to_string(), "michael.simons".to_string()),
            ("https://twitter.com/test".to_string(), "@test".to_string()),
            ("https://twitter.com/rotnroll666".to_string(), "@rotnroll666".to_string()),
            ("http://twitter.com".to_string(), "twitter.com".to_string()),
        ]
    );
    assert_eq!(service.add_links(linked.as_deref(), None), linked);
    Ok(())
}

#[test]
fn entities_survive_linking() -> Result<()> {
    let service = default_service()?;
    assert_eq!(
        service.add_links(Some("Gr&uuml;&szlig;e an heise.de"), None).as_deref(),
        Some("Grüße an <a href=\"http://heise.de\" title=\"http://heise.de\">heise.de</a>")
    );
    assert_eq!(
        service.add_links(Some("Tom &amp; Jerry &lt;3"), None).as_deref(),
        Some("Tom &amp; Jerry &lt;3")
    );
    Ok(())
}

#[test]
fn script_content_is_never_linked() -> Result<()> {
    let service = default_service()?;
    let html = "<script>var site = 'example.com';</script>";
    assert_eq!(service.add_links(Some(html), None).as_deref(), Some(html));
    Ok(())
}

#[test]
fn blank_input_is_returned_unchanged() -> Result<()> {
    let service = default_service()?;
    assert_eq!(service.add_links(None, None), None);
    assert_eq!(service.add_links(Some(""), None).as_deref(), Some(""));
    assert_eq!(service.add_links(Some(" \t\n "), None).as_deref(), Some(" \t\n "));
    Ok(())
}

#[test]
fn document_target_carries_the_base_url() -> Result<()> {
    let service = default_service()?;
    let target: OutputTarget = "document".parse()?;
    let Linked::Document(document) =
        service.add_links_to(Some("<p>@rotnroll666</p>"), Some("http://example.com/"), target)?
    else {
        panic!("expected a document");
    };
    assert_eq!(document.base_uri(), "http://example.com/");
    let p = document.body().child(0).and_then(|n| n.as_element()).expect("a paragraph");
    let a = p.child(0).and_then(|n| n.as_element()).expect("an anchor");
    assert_eq!(a.attr("href"), Some("https://twitter.com/rotnroll666"));
    assert_eq!(a.base_uri(), "http://example.com/");
    Ok(())
}

#[test]
fn unsupported_target_is_an_invalid_argument() {
    let err = "pdf".parse::<OutputTarget>().unwrap_err();
    assert_eq!(err.to_string(), "Invalid target class: pdf");
}

#[test]
fn service_can_be_shared_between_threads() -> Result<()> {
    let service = default_service()?;
    let results: Vec<Option<String>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let service = &service;
                scope.spawn(move || service.add_links(Some(&format!("site{}.example.com", i)), None))
            })
            .collect();
        handles.into_iter().map(|h| h.join().expect("worker panicked")).collect()
    });
    for (i, result) in results.iter().enumerate() {
        let expected = format!(
            "<a href=\"http://site{i}.example.com\" title=\"http://site{i}.example.com\">site{i}.example.com</a>"
        );
        assert_eq!(result.as_deref(), Some(expected.as_str()));
    }
    Ok(())
}

#[test]
fn custom_detectors_plug_into_the_service() -> Result<()> {
    struct Issue;

    impl Detector for Issue {
        fn name(&self) -> &str {
            "issue"
        }

        fn find_matches(&self, text: &str) -> Vec<autolink_core::LinkMatch> {
            text.match_indices("#42")
                .map(|(start, matched)| autolink_core::LinkMatch {
                    kind: autolink_core::LinkKind::Url,
                    start,
                    end: start + matched.len(),
                    matched: matched.to_string(),
                    href: "https://tracker.example/42".to_string(),
                    title: None,
                    label: matched.to_string(),
                })
                .collect()
        }
    }

    let service = default_service()?.with_detector(Issue);
    assert_eq!(
        service.add_links(Some("fixes #42"), None).as_deref(),
        Some("fixes <a href=\"https://tracker.example/42\">#42</a>")
    );
    Ok(())
}
