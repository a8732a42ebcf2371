use crate::error::{FuzzyError, FuzzyResult};
use crate::rulebase::{Defuzzification, Rulebase};
use crate::variable::{InputId, OutputId, Variables};
use serde::{Deserialize, Serialize};

/// Crisp output sampled over a grid of two inputs. `z[j][i]` belongs to `(x[i], y[j])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlSurface {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<Vec<f64>>,
}

impl ControlSurface {
    pub fn value_at(&self, i: usize, j: usize) -> Option<f64> {
        self.z.get(j).and_then(|row| row.get(i)).copied()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SurfaceAxes {
    pub x_input: InputId,
    pub y_input: InputId,
    pub output: OutputId,
    pub steps_x: usize,
    pub steps_y: usize,
}

impl Rulebase {
    /// Sweeps both inputs across their domains. Whatever values the inputs held
    /// before the sweep are put back afterwards, also when evaluation fails.
    pub fn control_surface(
        &self,
        variables: &mut Variables,
        axes: SurfaceAxes,
        mode: Defuzzification,
    ) -> FuzzyResult<ControlSurface> {
        let x = variables.input(axes.x_input)?.domain().discretize(axes.steps_x)?;
        let y = variables.input(axes.y_input)?.domain().discretize(axes.steps_y)?;
        variables.output(axes.output)?;

        let saved_x = variables.input(axes.x_input)?.value();
        let saved_y = variables.input(axes.y_input)?.value();
        let swept = self.sweep(variables, &axes, &x, &y, mode);
        variables.restore_input(axes.x_input, saved_x)?;
        variables.restore_input(axes.y_input, saved_y)?;

        Ok(ControlSurface { x, y, z: swept? })
    }

    fn sweep(
        &self,
        variables: &mut Variables,
        axes: &SurfaceAxes,
        x: &[f64],
        y: &[f64],
        mode: Defuzzification,
    ) -> FuzzyResult<Vec<Vec<f64>>> {
        let mut z = vec![vec![0.0; x.len()]; y.len()];
        for (i, &xv) in x.iter().enumerate() {
            variables.set_input(axes.x_input, xv)?;
            for (j, &yv) in y.iter().enumerate() {
                variables.set_input(axes.y_input, yv)?;
                z[j][i] = self
                    .evaluate_output(variables, axes.output, mode)?
                    .ok_or(FuzzyError::UnknownOutput(axes.output.index()))?;
            }
        }
        Ok(z)
    }
}
