pub const LANDING_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";

const NOT_FOUND: &str = "not-found";

/// A resolved navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub path: String,
    pub title: &'static str,
    pub requires_auth: bool,
    pub params: Vec<(&'static str, String)>,
}

impl Route {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_login(&self) -> bool {
        self.path == LOGIN_PATH
    }

    pub fn is_register(&self) -> bool {
        self.path == REGISTER_PATH
    }

    pub fn is_not_found(&self) -> bool {
        self.name == NOT_FOUND
    }
}

#[derive(Debug, Clone, Copy)]
struct RouteDef {
    name: &'static str,
    pattern: &'static str,
    title: &'static str,
    requires_auth: bool,
}

const fn protected(name: &'static str, pattern: &'static str, title: &'static str) -> RouteDef {
    RouteDef {
        name,
        pattern,
        title,
        requires_auth: true,
    }
}

const fn public(name: &'static str, pattern: &'static str, title: &'static str) -> RouteDef {
    RouteDef {
        name,
        pattern,
        title,
        requires_auth: false,
    }
}

const APP_ROUTES: &[RouteDef] = &[
    protected("home", "/", "Home"),
    protected("shared-list", "/shared-list", "Shared List"),
    protected("my-list", "/my-list", "My List"),
    protected("add-plan", "/add-plan", "Add Plan"),
    protected("edit-plan", "/edit-plan/:planId", "Edit Plan"),
    protected("edit-user-plan", "/edit-user-plan/:userPlanId", "Edit User Plan"),
    protected("profile", "/profile", "Profile"),
    protected("budget", "/budget", "Budget"),
    public("login", LOGIN_PATH, "Login"),
    public("register", REGISTER_PATH, "Register"),
];

/// Maps paths to routes. Anything unmatched resolves to a public
/// not-found route.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
}

impl RouteTable {
    pub fn resolve(&self, path: &str) -> Route {
        let path = normalize(path);
        self.routes
            .iter()
            .find_map(|def| match_pattern(def.pattern, &path).map(|params| (def, params)))
            .map(|(def, params)| Route {
                name: def.name,
                path: path.clone(),
                title: def.title,
                requires_auth: def.requires_auth,
                params,
            })
            .unwrap_or_else(|| Route {
                name: NOT_FOUND,
                path,
                title: "Not Found",
                requires_auth: false,
                params: Vec::new(),
            })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            routes: APP_ROUTES.to_vec(),
        }
    }
}

fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        LANDING_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn match_pattern(pattern: &'static str, path: &str) -> Option<Vec<(&'static str, String)>> {
    let expected: Vec<&'static str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let actual: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if expected.len() != actual.len() {
        return None;
    }

    let mut params = Vec::new();
    for (want, got) in expected.into_iter().zip(actual) {
        match want.strip_prefix(':') {
            Some(name) => params.push((name, got.to_string())),
            None if want == got => {}
            None => return None,
        }
    }
    Some(params)
}
