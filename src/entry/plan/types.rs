use crate::args::FrontendCommand;
use crate::config::LoadPlan;

pub(in crate::entry) enum RunPlan {
    Load(Box<LoadPlan>),
    Frontend(FrontendCommand),
}
