pub mod dto;
pub mod use_case;
pub mod use_cases;

pub use dto::{LoginResponseDto, SignUpResponseDto, UserDto};
pub use use_case::UseCase;
pub use use_cases::{
    current_user::CurrentUserUseCase,
    login::{LoginOutcome, LoginUseCase},
    logout::LogoutUseCase,
    signup::{SignUpRequestDto, SignUpUseCase},
    verify_email::VerifyEmailUseCase,
};
