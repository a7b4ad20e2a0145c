use museum::{
    build::render::{RenderContext, Renderer},
    config::Config,
    error::Result,
    model::Museum,
};
use std::{cell::RefCell, env, path::PathBuf, rc::Rc};

pub fn test_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[derive(Clone, Default)]
pub struct TestRenderer(Rc<RefCell<Option<Museum>>>, Rc<RefCell<Option<Config>>>);

impl TestRenderer {
    #[allow(dead_code)] // Avoid a false positive on the dead code analysis.
    pub fn museum(&self) -> Museum {
        self.0.borrow_mut().take().expect("result was not set")
    }

    #[allow(dead_code)] // Avoid a false positive on the dead code analysis.
    pub fn config(&self) -> Config {
        self.1.borrow_mut().take().expect("result was not set")
    }
}

impl Renderer for TestRenderer {
    fn name(&self) -> &str {
        "test_renderer"
    }

    fn render(&self, ctx: RenderContext) -> Result<()> {
        *self.0.borrow_mut() = Some(ctx.museum.clone());
        *self.1.borrow_mut() = Some(ctx.config.clone());

        Ok(())
    }
}
