mod note_repo;
mod project_repo;
mod task_repo;
mod user_repo;

pub use note_repo::NoteRepository;
pub use project_repo::ProjectRepository;
pub use task_repo::TaskRepository;
pub use user_repo::UserRepository;
