use crate::config::Config;
use basis::{Basis, ContractedGaussian, PrimitiveGaussian};
use color_eyre::eyre::{Result, WrapErr};
use nalgebra::Vector3;
use tracing::info;

/// A basis function named in the configuration
#[derive(Debug, Clone)]
pub enum Function {
    Primitive(PrimitiveGaussian),
    Contracted(ContractedGaussian),
}

impl Function {
    pub fn label(&self) -> String {
        match self {
            Function::Primitive(p) => p.to_string(),
            Function::Contracted(c) => {
                let o = c.origin();
                let [i, j, k] = c.powers();
                format!(
                    "cgbf({:?},{:?},{} primitives)",
                    (o.x, o.y, o.z),
                    (i, j, k),
                    c.len()
                )
            }
        }
    }

    pub fn origin(&self) -> Vector3<f64> {
        match self {
            Function::Primitive(p) => p.origin(),
            Function::Contracted(c) => c.origin(),
        }
    }

    pub fn norm(&self) -> f64 {
        match self {
            Function::Primitive(p) => p.norm(),
            Function::Contracted(c) => c.norm(),
        }
    }
}

impl Basis for Function {
    fn evaluate(&self, r: &Vector3<f64>) -> f64 {
        match self {
            Function::Primitive(p) => p.evaluate(r),
            Function::Contracted(c) => c.evaluate(r),
        }
    }
}

/// Build every primitive and contraction listed in the configuration
pub fn build_functions(config: &Config) -> Result<Vec<Function>> {
    let mut functions = Vec::new();

    for (idx, params) in config.primitives.iter().enumerate() {
        let primitive = PrimitiveGaussian::try_from(params.clone())
            .wrap_err_with(|| format!("Invalid primitive #{}", idx + 1))?;
        functions.push(Function::Primitive(primitive));
    }

    for (idx, params) in config.contractions().iter().enumerate() {
        let mut contracted = ContractedGaussian::from_slices(&params.origin, &params.powers)
            .wrap_err_with(|| format!("Invalid contraction #{}", idx + 1))?;
        for &(exponent, coefficient) in &params.primitives {
            contracted
                .add_primitive(exponent, coefficient)
                .wrap_err_with(|| format!("Invalid primitive in contraction #{}", idx + 1))?;
        }
        functions.push(Function::Contracted(contracted));
    }

    info!(
        "Built {} primitive and {} contracted functions",
        config.primitives.len(),
        config.contractions().len()
    );
    Ok(functions)
}
