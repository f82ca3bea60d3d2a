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

use arealog::Level;
use arealog::Manager;
use arealog::Rgb;
use arealog::config::AreaMode;
use arealog::filter::LogArea;

fn main() {
    let manager = Manager::builder()
        .minimum_level(Level::DEBUG.rank())
        .layout("{color:hex=#545454}[{time:format=HH:mm:ss.SSS}] {levelColor}[{level}]{reset} {areaColor}{area}{reset} {message}")
        .build()
        .unwrap();

    manager.register_area(LogArea::new("net").with_color(Rgb::new(0, 170, 255)));
    manager.register_area(
        LogArea::new("net.tls")
            .with_parents(["net"])
            .with_enabled(false),
    );
    manager.register_area(LogArea::new("db").with_color(Rgb::new(255, 150, 0)));

    let logger = manager.logger("demo");
    arealog::info!(logger, area: "net", "listening on {}", "0.0.0.0:8080");
    arealog::debug!(logger, area: "net.tls", "shown because its parent is enabled");
    arealog::warn!(logger, area: "db", "pool exhausted, {} waiting", 3);

    manager.set_area_mode(AreaMode::Strict);
    arealog::info!(logger, area: "cache", "hidden in strict mode");

    manager.disable_area("net");
    arealog::info!(logger, area: "net.tls", "hidden now that net is off");

    logger.info("multi-line\nmessages are laid out\nline by line", &[]);
    manager.shutdown();
}
