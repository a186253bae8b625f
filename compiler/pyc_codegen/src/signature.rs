//! C function signatures.
//!
//! A signature is either supplied by the caller or derived from the `def`
//! header's annotations.

use pyc_parse::FunctionHeader;

use crate::types::CType;
use crate::TranslateError;

/// One C parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: String,
    pub ty: CType,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: CType) -> Self {
        Param {
            name: name.into(),
            ty,
        }
    }
}

/// Name, parameters and return type of a C function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionSignature {
    pub name: String,
    pub params: Vec<Param>,
    pub returns: CType,
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>, params: Vec<Param>, returns: CType) -> Self {
        FunctionSignature {
            name: name.into(),
            params,
            returns,
        }
    }

    /// Derive the signature from header annotations.
    ///
    /// Every parameter needs an annotation naming a value type. A missing
    /// return annotation, or `None`, means `void`. Lists are accepted as
    /// parameters only.
    pub fn from_header(header: &FunctionHeader) -> Result<Self, TranslateError> {
        let mut params = Vec::with_capacity(header.params.len());
        for param in &header.params {
            let ty = match &param.annotation {
                Some(annotation) => match CType::from_annotation(&annotation.text) {
                    Some(CType::Void) | None => {
                        return Err(TranslateError::unresolved_type(
                            &param.name,
                            annotation.location,
                        ))
                    }
                    Some(ty) => ty,
                },
                None => {
                    return Err(TranslateError::unresolved_type(
                        &param.name,
                        param.location,
                    ))
                }
            };
            params.push(Param::new(&param.name, ty));
        }

        let returns = match &header.returns {
            None => CType::Void,
            Some(annotation) => match CType::from_annotation(&annotation.text) {
                Some(ty @ (CType::Void | CType::Scalar(_))) => ty,
                _ => {
                    return Err(TranslateError::unresolved_type(
                        &header.name,
                        annotation.location,
                    ))
                }
            },
        };

        Ok(FunctionSignature::new(&header.name, params, returns))
    }

    /// C declaration without the trailing semicolon:
    /// `int64_t f(int64_t a, double *xs)`, or `void f(void)`.
    pub fn declaration(&self) -> String {
        let params = if self.params.is_empty() {
            "void".to_owned()
        } else {
            self.params
                .iter()
                .map(|p| p.ty.declare(&p.name, 0))
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!("{}({params})", self.returns.declare(&self.name, 0))
    }
}

#[cfg(test)]
mod tests;
