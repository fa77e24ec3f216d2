use std::collections::HashMap;

/// Mutable bag of default headers applied to every request of a run.
#[derive(Debug, Default, Clone)]
pub struct HeaderBag {
    headers: HashMap<String, String>,
}

impl HeaderBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_header<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.headers.insert(name.into(), value.into());
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

/// Extension point invoked once per run, before any request, to register
/// default headers (auth tokens and the like). Deliberately narrow: a hook
/// only sees the header bag.
pub trait BootHook {
    fn run(&self, headers: &mut HeaderBag);
}

impl<F: Fn(&mut HeaderBag)> BootHook for F {
    fn run(&self, headers: &mut HeaderBag) {
        self(headers)
    }
}

/// Builds the header bag for a run, running the hook if one is installed.
pub fn boot(hook: Option<&dyn BootHook>) -> HeaderBag {
    let mut bag = HeaderBag::new();
    if let Some(hook) = hook {
        println!("Booting...");
        hook.run(&mut bag);
        println!("..Done!");
    }
    bag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_registers_headers_for_the_run() {
        let hook = |bag: &mut HeaderBag| {
            bag.add_header("Authorization", "Bearer token");
        };

        let bag = boot(Some(&hook));
        assert_eq!(
            bag.headers().get("Authorization").map(String::as_str),
            Some("Bearer token")
        );
    }

    #[test]
    fn no_hook_yields_an_empty_bag() {
        assert!(boot(None).headers().is_empty());
    }
}
