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

//! Call-site information for the `trace` placeholders.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::path::Path;

/// Where a log call was made.
///
/// `class` is the innermost module (or file stem) and `method` the enclosing function, when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    class: Cow<'static, str>,
    method: Cow<'static, str>,
    line: u32,
}

impl CallSite {
    pub fn new(
        class: impl Into<Cow<'static, str>>,
        method: impl Into<Cow<'static, str>>,
        line: u32,
    ) -> Self {
        Self {
            class: class.into(),
            method: method.into(),
            line,
        }
    }

    /// Builds a call site from `module_path!()`, the path of the enclosing function as reported
    /// by `std::any::type_name`, and `line!()`.
    #[doc(hidden)]
    pub fn from_macro(module_path: &'static str, function: &'static str, line: u32) -> Self {
        let class = last_segment(module_path);
        let function = function.strip_suffix("::__f").unwrap_or(function);
        let mut function = function;
        while let Some(outer) = function.strip_suffix("::{{closure}}") {
            function = outer;
        }
        Self::new(class, last_segment(function), line)
    }

    /// Best-effort call site from the location of a `#[track_caller]` function.
    pub fn from_location(location: &Location<'static>) -> Self {
        let class = Path::new(location.file())
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("unknown");
        Self::new(class, "unknown", location.line())
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.class, self.method, self.line)
    }
}

fn last_segment(path: &'static str) -> &'static str {
    match path.rfind("::") {
        Some(pos) => &path[pos + 2..],
        None => path,
    }
}

/// Supplies the call site of the record being logged.
///
/// Consulted when a record was not logged through one of the crate macros.
pub trait CallSiteProvider: fmt::Debug + Send + Sync + 'static {
    fn call_site(&self) -> Option<CallSite>;
}

impl<T: CallSiteProvider> CallSiteProvider for std::sync::Arc<T> {
    fn call_site(&self) -> Option<CallSite> {
        (**self).call_site()
    }
}

/// Expands to the [`CallSite`] of the macro invocation.
#[macro_export]
#[doc(hidden)]
macro_rules! __call_site {
    () => {{
        fn __f() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::trace::CallSite::from_macro(
            ::std::module_path!(),
            __type_name_of(__f),
            ::std::line!(),
        )
    }};
}
