// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use arealog::Level;
use arealog::Manager;
use arealog::Value;
use arealog::append::Testing;
use arealog::color::strip_ansi;
use arealog::config::AreaMode;
use arealog::filter::ALL_AREAS;
use arealog::filter::LogArea;
use arealog::layout::Placeholders;

fn manager_with(layout: &str) -> (Arc<Testing>, Arc<Manager>) {
    let sink = Arc::new(Testing::default());
    let manager = Manager::builder()
        .console(sink.clone())
        .color(false)
        .layout(layout)
        .build()
        .unwrap();
    (sink, manager)
}

fn output(sink: &Testing) -> Vec<String> {
    sink.take()
        .into_iter()
        .map(|line| strip_ansi(&line).into_owned())
        .collect()
}

#[test]
fn positional_arguments_fill_the_message() {
    let (sink, manager) = manager_with("{message}");
    let logger = manager.logger("app");
    logger.info("Hello {}, you are {}", &[Value::from("World"), Value::from(42)]);
    logger.info("{} and {}", &[Value::from(1)]);
    logger.info("only {}", &[Value::from(1), Value::from(2)]);
    assert_eq!(
        output(&sink),
        vec!["Hello World, you are 42", "1 and {}", "only 1"]
    );
}

#[test]
fn layout_renders_level_and_message() {
    let (sink, manager) = manager_with("{level}: {message}");
    manager.set_minimum_level(Level::DEBUG.rank());
    manager.logger("app").debug("Test message", &[]);
    assert_eq!(output(&sink), vec!["DEBUG: Test message"]);
}

#[test]
fn records_below_minimum_rank_are_dropped() {
    let (sink, manager) = manager_with("{level}: {message}");
    let logger = manager.logger("app");
    logger.debug("hidden", &[]);
    logger.verbose("hidden", &[]);
    logger.stacktrace("hidden", &[]);
    logger.warn("shown", &[]);
    assert_eq!(output(&sink), vec!["WARN: shown"]);
}

#[test]
fn blacklisted_areas_are_dropped() {
    let (sink, manager) = manager_with("{area}: {message}");
    manager
        .set_area_filter_patterns(["com.internal.*"], true)
        .unwrap();
    let logger = manager.logger("app");
    logger.log(&Level::INFO, Some("com.internal.cache"), "hit", &[]);
    logger.log(&Level::INFO, Some("com.api.Handler"), "request", &[]);
    assert_eq!(output(&sink), vec!["com.api.Handler: request"]);
}

#[test]
fn whitelist_patterns_can_be_added() {
    let (sink, manager) = manager_with("{area}: {message}");
    manager.set_area_filter_patterns(["net"], false).unwrap();
    manager.add_area_filter_pattern("db.*").unwrap();
    assert!(manager.add_area_filter_pattern("^(unclosed$").is_err());

    let logger = manager.logger("app");
    for area in ["net", "db.pool", "ui"] {
        logger.log(&Level::INFO, Some(area), "x", &[]);
    }
    assert_eq!(output(&sink), vec!["net: x", "db.pool: x"]);
    assert_eq!(manager.config().area_filter.patterns, vec!["net", "db.*"]);
}

#[test]
fn each_line_of_a_message_is_laid_out() {
    let (sink, manager) = manager_with("[{prefix}] [{level}]: {message}");
    manager.logger("app").warn("one\ntwo\nthree", &[]);
    assert_eq!(
        output(&sink),
        vec![
            "[app] [WARN]: one",
            "[app] [WARN]: two",
            "[app] [WARN]: three",
        ]
    );
}

#[test]
fn empty_message_still_produces_a_line() {
    let (sink, manager) = manager_with("[{level}]: {message}");
    manager.logger("app").info("", &[]);
    assert_eq!(output(&sink), vec!["[INFO]: "]);
}

#[test]
fn placeholders_inside_messages_are_not_expanded() {
    let (sink, manager) = manager_with("{level}: {message}");
    manager
        .logger("app")
        .info("{level} {}", &[Value::from("{time}")]);
    assert_eq!(output(&sink), vec!["INFO: {level} {time}"]);
}

#[test]
fn filtered_calls_do_not_evaluate_arguments() {
    let (sink, manager) = manager_with("{message}");
    let logger = manager.logger("app");
    let evaluated = Rc::new(Cell::new(0));

    let counter = evaluated.clone();
    let lazy = Value::lazy(move || {
        counter.set(counter.get() + 1);
        "expensive"
    });
    logger.debug("{}", &[lazy.clone()]);
    arealog::debug!(logger, "{}", {
        evaluated.set(evaluated.get() + 1);
        "eager"
    });
    assert_eq!(evaluated.get(), 0);

    logger.info("{}", &[lazy]);
    assert_eq!(evaluated.get(), 1);
    assert_eq!(output(&sink), vec!["expensive"]);
}

#[test]
fn muted_manager_writes_nothing() {
    let (sink, manager) = manager_with("{message}");
    let logger = manager.logger("app");
    manager.set_muted(true);
    logger.fatal("hidden", &[]);
    manager.set_muted(false);
    logger.fatal("shown", &[]);
    assert_eq!(output(&sink), vec!["shown"]);
}

#[test]
fn strict_mode_hides_unregistered_areas() {
    let (sink, manager) = manager_with("{area}");
    let logger = manager.logger("app");
    manager.register_area(LogArea::new("known"));

    logger.log(&Level::INFO, Some("unknown"), "", &[]);
    manager.set_area_mode(AreaMode::Strict);
    logger.log(&Level::INFO, Some("unknown"), "", &[]);
    logger.log(&Level::INFO, Some("known"), "", &[]);
    assert_eq!(output(&sink), vec!["unknown", "known"]);
}

#[test]
fn parent_enablement_is_one_level_deep() {
    let (sink, manager) = manager_with("{area}");
    manager.set_area_mode(AreaMode::Strict);
    manager.register_area(LogArea::new("root"));
    manager.register_area(
        LogArea::new("child")
            .with_parents(["root"])
            .with_enabled(false),
    );
    manager.register_area(
        LogArea::new("grandchild")
            .with_parents(["child"])
            .with_enabled(false),
    );

    let logger = manager.logger("app");
    for area in ["root", "child", "grandchild"] {
        logger.log(&Level::INFO, Some(area), "", &[]);
    }
    assert_eq!(output(&sink), vec!["root", "child"]);

    manager.register_area(LogArea::new(ALL_AREAS));
    logger.log(&Level::INFO, Some("grandchild"), "", &[]);
    logger.log(&Level::INFO, Some("anything"), "", &[]);
    assert_eq!(output(&sink), vec!["grandchild", "anything"]);
}

#[test]
fn disabled_areas_can_be_enabled_again() {
    let (sink, manager) = manager_with("{area}");
    manager.register_area(LogArea::new("net"));
    assert!(manager.disable_area("net"));
    assert!(!manager.disable_area("missing"));

    let logger = manager.logger("app").with_default_area("net");
    logger.info("", &[]);
    assert!(manager.enable_area("net"));
    logger.info("", &[]);
    assert_eq!(output(&sink), vec!["net"]);
}

#[test]
fn custom_placeholders_use_their_defaults() {
    let sink = Arc::new(Testing::default());
    let placeholders = Placeholders::builder()
        .register_with_defaults("tag", "text=none", |_, args| {
            format!("<{}>", args.get("text").unwrap_or_default())
        })
        .build()
        .unwrap();
    let manager = Manager::builder()
        .console(sink.clone())
        .color(false)
        .placeholders(placeholders)
        .layout("{tag} {tag:text=x} {unknown} {message}")
        .build()
        .unwrap();
    manager.logger("app").info("m", &[]);
    assert_eq!(output(&sink), vec!["<none> <x> {unknown} m"]);
}

#[test]
fn colors_are_only_rendered_when_enabled() {
    let (sink, manager) = manager_with("{levelColor}{level}{reset} {message}");
    let logger = manager.logger("app");
    logger.info("plain", &[]);
    manager.set_color(true);
    logger.info("colored", &[]);

    let lines = sink.take();
    assert_eq!(lines[0], "INFO plain\x1b[0m");
    assert!(lines[1].starts_with("\x1b[38;2;"));
    assert_eq!(strip_ansi(&lines[1]), "INFO colored");
}

#[test]
fn macros_capture_the_calling_function() {
    let (sink, manager) = manager_with("{traceClass}.{traceMethod} {area} {message}");
    let logger = manager.logger("app");
    arealog::info!(logger, "{} + {}", 1, 2);
    arealog::warn!(logger, area: "net", "retry");
    assert_eq!(
        output(&sink),
        vec![
            "routing.macros_capture_the_calling_function  1 + 2",
            "routing.macros_capture_the_calling_function net retry",
        ]
    );
}

#[test]
fn method_calls_fall_back_to_the_caller_location() {
    let (sink, manager) = manager_with("{trace}");
    manager.logger("app").info("", &[]);
    let line = line!() - 1;
    assert_eq!(output(&sink), vec![format!("routing:unknown:{line}")]);
}

#[test]
fn invalid_layout_is_rejected() {
    let (_, manager) = manager_with("{message}");
    assert!(manager.set_layout("").is_err());
    assert!(
        Manager::builder()
            .area_filter(["^(broken$"], false)
            .build()
            .is_err()
    );
}

#[test]
fn plain_logger_pads_the_level() {
    let (sink, manager) = manager_with("{message}");
    let plain = manager.plain_logger();
    arealog::Log::log(&plain, &Level::INFO, "ready in {}ms", &[Value::from(12)]);
    assert!(matches!(
        arealog::Log::log_area(&plain, &Level::INFO, "net", "x", &[]),
        Err(arealog::Error::AreasUnsupported)
    ));
    assert_eq!(output(&sink), vec!["[INFO]:       ready in 12ms"]);
}
