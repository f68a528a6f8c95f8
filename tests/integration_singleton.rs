// vite-toolkit: Vite configuration helpers
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the process-wide toolkit instance.
//!
//! Kept in its own test binary: the instance lives for the whole process, so
//! no other test may create it first.

use vite_toolkit::Toolkit;
use vite_toolkit::toolkit::{Command, ConfigEnv, ModeMapping, ToolkitOptions};

#[test]
fn singleton_first_call_wins() {
    assert!(Toolkit::get_instance().is_none());

    let first = Toolkit::create_instance(
        ConfigEnv::new("development", Command::Serve),
        ToolkitOptions::default(),
    );
    let second = Toolkit::create_instance(
        ConfigEnv::new("production", Command::Build),
        ToolkitOptions::builder()
            .with_mode_mapping(ModeMapping::new().with("dev", "dev-mode"))
            .build(),
    );

    assert!(std::ptr::eq(first, second));
    assert_eq!(second.config_env().mode(), "development");
    assert_eq!(second.config_env().command(), Command::Serve);
    assert_eq!(second.get_mode("dev"), Some("development"));
    assert!(second.is_dev() && second.is_serve());

    let installed = Toolkit::new(
        ConfigEnv::new("test", Command::Build),
        ToolkitOptions::default(),
    )
    .install();
    assert!(std::ptr::eq(first, installed));

    let fetched = Toolkit::get_instance().expect("instance should exist");
    assert!(std::ptr::eq(first, fetched));
}
