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

//! Positional `{}` substitution of message arguments.

use std::fmt::Write;

pub use self::value::Value;

mod value;

/// Containers nested deeper than this render as `...`.
pub const MAX_DEPTH: usize = 64;

const CIRCULAR_LIST: &str = "[...] (circular reference detected)";
const CIRCULAR_MAP: &str = "{...} (circular reference detected)";

/// Replaces each `{}` in `template` with the string form of the next argument.
///
/// Extra arguments are ignored and extra `{}` are kept literally. Substituted text is never
/// scanned again, so an argument containing `{}` does not consume further arguments.
///
/// ```
/// use arealog::format::Value;
/// use arealog::format::format;
///
/// let args = [Value::from("World"), Value::from(42)];
/// assert_eq!(format("Hello {}, you are {}", &args), "Hello World, you are 42");
/// assert_eq!(format("{} and {}", &args[..1]), "World and {}");
/// ```
pub fn format(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;

    while let Some(pos) = rest.find("{}") {
        let Some(arg) = args.next() else {
            break;
        };
        out.push_str(&rest[..pos]);
        Stringifier::new(&mut out).write(arg, 0);
        rest = &rest[pos + 2..];
    }

    out.push_str(rest);
    out
}

/// Renders a single value the way [`format`] would.
pub fn stringify(value: &Value) -> String {
    let mut out = String::new();
    Stringifier::new(&mut out).write(value, 0);
    out
}

struct Stringifier<'a> {
    out: &'a mut String,
    // identities of the containers currently being rendered
    path: Vec<*const ()>,
}

impl<'a> Stringifier<'a> {
    fn new(out: &'a mut String) -> Self {
        Self { out, path: vec![] }
    }

    fn write(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(v) => {
                let _ = write!(self.out, "{v}");
            }
            Value::Int(v) => {
                let _ = write!(self.out, "{v}");
            }
            Value::UInt(v) => {
                let _ = write!(self.out, "{v}");
            }
            Value::Float(v) => {
                let _ = write!(self.out, "{v:?}");
            }
            Value::Char(v) => self.out.push(*v),
            Value::Str(v) => self.out.push_str(v),
            Value::Lazy(f) => {
                if depth >= MAX_DEPTH {
                    self.out.push_str("...");
                } else {
                    self.write(&f(), depth + 1);
                }
            }
            Value::List(items) => {
                let id = std::rc::Rc::as_ptr(items) as *const ();
                if self.path.contains(&id) {
                    self.out.push_str(CIRCULAR_LIST);
                    return;
                }
                if depth >= MAX_DEPTH {
                    self.out.push_str("...");
                    return;
                }
                let Ok(items) = items.try_borrow() else {
                    self.out.push_str("[...]");
                    return;
                };

                self.path.push(id);
                self.out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.write(item, depth + 1);
                }
                self.out.push(']');
                self.path.pop();
            }
            Value::Map(entries) => {
                let id = std::rc::Rc::as_ptr(entries) as *const ();
                if self.path.contains(&id) {
                    self.out.push_str(CIRCULAR_MAP);
                    return;
                }
                if depth >= MAX_DEPTH {
                    self.out.push_str("...");
                    return;
                }
                let Ok(entries) = entries.try_borrow() else {
                    self.out.push_str("{...}");
                    return;
                };

                self.path.push(id);
                self.out.push('{');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.write(key, depth + 1);
                    self.out.push_str(" -> ");
                    self.write(value, depth + 1);
                }
                self.out.push('}');
                self.path.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn substitutes_in_order() {
        let args: [Value; 2] = ["World".into(), 42.into()];
        assert_eq!(
            format("Hello {}, you are {}", &args),
            "Hello World, you are 42"
        );
    }

    #[test]
    fn mismatched_counts_are_tolerated() {
        assert_eq!(format("{}", &[Value::from(1), Value::from(2), Value::from(3)]), "1");
        assert_eq!(format("a {} b {} c {}", &[Value::from(1)]), "a 1 b {} c {}");
        assert_eq!(format("no placeholders", &[Value::from(1)]), "no placeholders");
        assert_eq!(format("", &[]), "");
    }

    #[test]
    fn substituted_text_is_not_rescanned() {
        let args: [Value; 2] = ["{}".into(), "x".into()];
        assert_eq!(format("{} {}", &args), "{} x");
    }

    #[test]
    fn scalars() {
        let args: [Value; 6] = [
            Value::Null,
            true.into(),
            (-3i8).into(),
            7u64.into(),
            1.0f64.into(),
            'c'.into(),
        ];
        assert_eq!(format("{} {} {} {} {} {}", &args), "null true -3 7 1.0 c");
    }

    #[test]
    fn nested_containers() {
        let inner = Value::list([1, 2]);
        let map = Value::map([("k", inner.clone())]);
        let outer = Value::list([map, Value::from("s"), inner]);
        assert_eq!(stringify(&outer), "[{k -> [1, 2]}, s, [1, 2]]");
    }

    #[test]
    fn shared_but_acyclic_values_are_not_circular() {
        let shared = Value::list(["x"]);
        let outer = Value::list([shared.clone(), shared]);
        assert_eq!(stringify(&outer), "[[x], [x]]");
    }

    #[test]
    fn self_referencing_list() {
        let list = Value::list(["a"]);
        assert!(list.push(list.clone()));
        assert_eq!(
            stringify(&list),
            "[a, [...] (circular reference detected)]"
        );
        // break the cycle so the test does not leak
        if let Value::List(items) = &list {
            items.borrow_mut().clear();
        }
    }

    #[test]
    fn self_referencing_map() {
        let map = Value::map(Vec::<(Value, Value)>::new());
        assert!(map.insert("me", map.clone()));
        assert_eq!(
            stringify(&map),
            "{me -> {...} (circular reference detected)}"
        );
        if let Value::Map(entries) = &map {
            entries.borrow_mut().clear();
        }
    }

    #[test]
    fn deep_nesting_is_capped() {
        let mut value = Value::from("leaf");
        for _ in 0..(MAX_DEPTH + 10) {
            value = Value::list([value]);
        }
        let rendered = stringify(&value);
        assert!(rendered.contains("..."));
        assert!(!rendered.contains("leaf"));
        assert_eq!(rendered.matches('[').count(), MAX_DEPTH);
    }

    #[test]
    fn lazy_values_are_evaluated_when_consumed() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let lazy = Value::lazy(move || {
            counter.set(counter.get() + 1);
            "computed"
        });

        assert_eq!(format("no slot", &[lazy.clone()]), "no slot");
        assert_eq!(calls.get(), 0);

        assert_eq!(format("got {}", &[lazy]), "got computed");
        assert_eq!(calls.get(), 1);
    }
}
