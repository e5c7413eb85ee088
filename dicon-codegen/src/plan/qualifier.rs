/// Package qualification relative to the container's own package.
///
/// References declared in the container's package are emitted bare; anything
/// else is prefixed with `<package><separator>`. An empty package denotes a
/// predeclared type (`string`, `error`, ...) and is never qualified. No import
/// graph is consulted.
#[derive(Debug, Clone, Copy)]
pub struct Qualifier<'a> {
    own_package: &'a str,
    separator: &'static str,
}

impl<'a> Qualifier<'a> {
    pub fn new(own_package: &'a str, separator: &'static str) -> Self {
        Self {
            own_package,
            separator,
        }
    }

    /// Prefix to put in front of a name declared in `package`.
    pub fn prefix(&self, package: &str) -> String {
        if package == self.own_package || package.is_empty() {
            String::new()
        } else {
            format!("{}{}", package, self.separator)
        }
    }

    /// `name` as seen from the container's package.
    pub fn qualify(&self, package: &str, name: &str) -> String {
        format!("{}{}", self.prefix(package), name)
    }
}
