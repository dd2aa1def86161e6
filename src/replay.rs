//! Scripted event replay.
//!
//! A replay script is a plain-text list of user events, one per line, run
//! against a [`Site`] with the gallery loaded. Events take the same path
//! a browser's would, raw events through the controller, which lets the
//! `replay` command check behavior without a browser.
//!
//! ```text
//! # open the second portfolio item at its first image
//! page portfolio
//! open 2
//! key ArrowRight
//! swipe -80          # leftward swipe
//! tap                # short touch on the image
//! click thumb:0
//! key shift+Tab
//! key Escape
//! ```
//!
//! | Line | Event |
//! |------|-------|
//! | `page <home\|about\|portfolio>` | nav link |
//! | `open <item> [start]` | open an item (1-based position or title) |
//! | `key <name>` / `key shift+<name>` | key press |
//! | `swipe <dx>` | touch from x=0 to x=dx, off the image |
//! | `tap` | short touch on the image |
//! | `click <control>` | `previous`, `next`, `close`, `zoom`, `thumbnails`, `thumb:<i>`, `backdrop`, `image` |
//! | `close` | programmatic close |
//!
//! `#` starts a comment. Blank lines are skipped.

use crate::content::Gallery;
use crate::controller::Handled;
use crate::effects::Host;
use crate::input::Control;
use crate::router::{Page, RouteEvent, Site};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Page(Page),
    Open { item: String, start: usize },
    Key { key: String, shift: bool },
    Swipe(f64),
    Tap,
    Click(Control),
    Close,
}

/// A parsed step with its source line for echoing.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub number: usize,
    pub text: String,
    pub step: Step,
}

/// What a step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Handled(Handled),
    Opened,
    PageChanged(Page),
    Closed { return_focus: Option<String> },
    UnknownItem(String),
}

pub fn parse_script(script: &str) -> Result<Vec<ScriptLine>, ReplayError> {
    script
        .lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let text = raw.split('#').next().unwrap_or("").trim();
            if text.is_empty() {
                return None;
            }
            let number = i + 1;
            Some(
                parse_step(text)
                    .map(|step| ScriptLine {
                        number,
                        text: text.to_string(),
                        step,
                    })
                    .map_err(|message| ReplayError::Parse {
                        line: number,
                        message,
                    }),
            )
        })
        .collect()
}

fn parse_step(text: &str) -> Result<Step, String> {
    let mut words = text.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();
    match (verb, args.as_slice()) {
        ("page", [slug]) => slug.parse().map(Step::Page),
        ("open", [item]) => Ok(Step::Open {
            item: item.to_string(),
            start: 0,
        }),
        ("open", [item, start]) => start
            .parse()
            .map(|start| Step::Open {
                item: item.to_string(),
                start,
            })
            .map_err(|_| format!("invalid start index: {start}")),
        ("key", [key]) => Ok(match key.strip_prefix("shift+") {
            Some(key) => Step::Key {
                key: key.to_string(),
                shift: true,
            },
            None => Step::Key {
                key: key.to_string(),
                shift: false,
            },
        }),
        ("swipe", [dx]) => dx
            .parse()
            .map(Step::Swipe)
            .map_err(|_| format!("invalid displacement: {dx}")),
        ("tap", []) => Ok(Step::Tap),
        ("click", [control]) => parse_control(control).map(Step::Click),
        ("close", []) => Ok(Step::Close),
        _ => Err(format!("unrecognized step: {text}")),
    }
}

fn parse_control(name: &str) -> Result<Control, String> {
    if let Some(index) = name.strip_prefix("thumb:") {
        return index
            .parse()
            .map(Control::Thumbnail)
            .map_err(|_| format!("invalid thumbnail index: {index}"));
    }
    match name {
        "previous" | "prev" => Ok(Control::Previous),
        "next" => Ok(Control::Next),
        "close" => Ok(Control::Close),
        "zoom" => Ok(Control::ZoomButton),
        "thumbnails" => Ok(Control::ThumbnailsButton),
        "backdrop" => Ok(Control::Backdrop),
        "image" => Ok(Control::Image),
        _ => Err(format!("unknown control: {name}")),
    }
}

/// Run one step against the site.
pub fn run_step<H: Host>(site: &mut Site<H>, gallery: &Gallery, step: &Step) -> Outcome {
    match step {
        Step::Page(page) => Outcome::PageChanged(site.dispatch(RouteEvent::Navigate(*page))),
        Step::Open { item, start } => {
            let Some(found) = gallery.find(item) else {
                return Outcome::UnknownItem(item.clone());
            };
            let trigger = format!("item-{}", found.title.to_lowercase());
            match site.open_lightbox(found.open_request(*start), Some(trigger)) {
                Ok(()) => Outcome::Opened,
                Err(err) => Outcome::Handled(Handled::Rejected(err)),
            }
        }
        Step::Key { key, shift } => Outcome::Handled(site.lightbox_mut().handle_key(key, *shift)),
        Step::Swipe(dx) => {
            let lightbox = site.lightbox_mut();
            lightbox.handle_touch_start(0.0);
            Outcome::Handled(lightbox.handle_touch_end(*dx, false))
        }
        Step::Tap => {
            let lightbox = site.lightbox_mut();
            lightbox.handle_touch_start(0.0);
            Outcome::Handled(lightbox.handle_touch_end(0.0, true))
        }
        Step::Click(control) => Outcome::Handled(site.lightbox_mut().handle_control(*control).handled),
        Step::Close => Outcome::Closed {
            return_focus: site.lightbox_mut().close(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LightboxConfig;
    use crate::content::load_gallery;
    use crate::controller::LightboxController;
    use crate::effects::RecordingHost;
    use crate::session::{Applied, LightboxError};
    use crate::test_helpers::GALLERY_JSON;

    fn site() -> Site<RecordingHost> {
        Site::new(LightboxController::new(
            LightboxConfig::default(),
            RecordingHost::new(),
        ))
    }

    #[test]
    fn parse_all_step_kinds() {
        let script = "
            page portfolio
            open Bridal 2   # third image
            key ArrowRight
            key shift+Tab
            swipe -80
            tap
            click thumb:1
            click prev
            close
        ";
        let lines = parse_script(script).unwrap();
        let steps: Vec<&Step> = lines.iter().map(|l| &l.step).collect();
        assert_eq!(
            steps,
            vec![
                &Step::Page(Page::Portfolio),
                &Step::Open {
                    item: "Bridal".to_string(),
                    start: 2
                },
                &Step::Key {
                    key: "ArrowRight".to_string(),
                    shift: false
                },
                &Step::Key {
                    key: "Tab".to_string(),
                    shift: true
                },
                &Step::Swipe(-80.0),
                &Step::Tap,
                &Step::Click(Control::Thumbnail(1)),
                &Step::Click(Control::Previous),
                &Step::Close,
            ]
        );
        assert_eq!(lines[1].text, "open Bridal 2");
        assert_eq!(lines[1].number, 3);
    }

    #[test]
    fn parse_error_reports_line() {
        let err = parse_script("tap\nwiggle").unwrap_err();
        assert_eq!(
            err,
            ReplayError::Parse {
                line: 2,
                message: "unrecognized step: wiggle".to_string()
            }
        );
    }

    #[test]
    fn parse_rejects_bad_numbers() {
        assert!(parse_script("swipe far").is_err());
        assert!(parse_script("open 1 x").is_err());
        assert!(parse_script("click thumb:-1").is_err());
        assert!(parse_script("page contact").is_err());
    }

    #[test]
    fn run_opens_and_navigates() {
        let gallery = load_gallery(GALLERY_JSON, Gallery::default);
        let mut site = site();
        assert_eq!(
            run_step(&mut site, &gallery, &Step::Open { item: "1".into(), start: 0 }),
            Outcome::Opened
        );
        let outcome = run_step(&mut site, &gallery, &Step::Swipe(-80.0));
        assert!(matches!(
            outcome,
            Outcome::Handled(Handled::Applied(Applied::Moved(_)))
        ));
        assert_eq!(site.lightbox().session().current_index(), Some(1));
    }

    #[test]
    fn run_unknown_item() {
        let gallery = load_gallery(GALLERY_JSON, Gallery::default);
        let mut site = site();
        assert_eq!(
            run_step(&mut site, &gallery, &Step::Open { item: "Runway".into(), start: 0 }),
            Outcome::UnknownItem("Runway".to_string())
        );
    }

    #[test]
    fn run_open_out_of_range_start() {
        let gallery = load_gallery(GALLERY_JSON, Gallery::default);
        let mut site = site();
        assert_eq!(
            run_step(&mut site, &gallery, &Step::Open { item: "2".into(), start: 9 }),
            Outcome::Handled(Handled::Rejected(LightboxError::IndexOutOfRange {
                index: 9,
                size: 2
            }))
        );
    }

    #[test]
    fn run_close_returns_trigger() {
        let gallery = load_gallery(GALLERY_JSON, Gallery::default);
        let mut site = site();
        run_step(&mut site, &gallery, &Step::Open { item: "bridal".into(), start: 0 });
        assert_eq!(
            run_step(&mut site, &gallery, &Step::Close),
            Outcome::Closed {
                return_focus: Some("item-bridal".to_string())
            }
        );
    }
}
