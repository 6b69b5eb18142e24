//! Fixed sample records written the first time each collection key is
//! observed empty, so the site never renders blank on first load. Content
//! is illustrative; ids are stable so seed records can reference each
//! other.

use chrono::{DateTime, Duration, Utc};

use crate::model::{
    BlogPost, Booking, BookingStatus, BookingType, ContactMessage, Event, EventType, Experience,
    Level, MessageSubject, Student, StudentStatus, Teacher,
};

fn days_ago(days: i64) -> Option<DateTime<Utc>> {
    Some(Utc::now() - Duration::days(days))
}

pub(crate) fn teachers() -> Vec<Teacher> {
    vec![
        Teacher {
            id: "teacher-1".to_string(),
            name: "Carlos Rodríguez".to_string(),
            image: "/tennis-coach.png".to_string(),
            role: "Entrenador Principal".to_string(),
            specialties: vec![
                "Técnica avanzada".to_string(),
                "Estrategia de juego".to_string(),
                "Preparación física".to_string(),
            ],
            experience: "15 años".to_string(),
            rating: 5.0,
            bio: "Ex jugador profesional con múltiples títulos nacionales. Carlos se \
                  especializa en llevar a jugadores de nivel intermedio a avanzado con un \
                  enfoque en la técnica y estrategia de juego."
                .to_string(),
            email: "carlos@padelpro.com".to_string(),
            phone: "612345678".to_string(),
            created_at: days_ago(60),
        },
        Teacher {
            id: "teacher-2".to_string(),
            name: "Ana Martínez".to_string(),
            image: "/female-coach.png".to_string(),
            role: "Entrenadora".to_string(),
            specialties: vec![
                "Iniciación".to_string(),
                "Técnica básica".to_string(),
                "Clases para niños".to_string(),
            ],
            experience: "8 años".to_string(),
            rating: 4.9,
            bio: "Ana tiene un don especial para trabajar con principiantes y niños. Su \
                  paciencia y metodología hacen que aprender pádel sea divertido y efectivo \
                  para todas las edades."
                .to_string(),
            email: "ana@padelpro.com".to_string(),
            phone: "623456789".to_string(),
            created_at: days_ago(60),
        },
    ]
}

pub(crate) fn students() -> Vec<Student> {
    vec![
        Student {
            id: "student-1".to_string(),
            name: "Pedro Sánchez".to_string(),
            email: "pedro@example.com".to_string(),
            phone: "612345678".to_string(),
            birth_date: "1990-05-15".to_string(),
            level: Level::Intermediate,
            experience: Experience::OneToThreeYears,
            preferred_days: vec!["Lunes".to_string(), "Miércoles".to_string()],
            preferred_time: "Tarde".to_string(),
            comments: None,
            status: StudentStatus::Approved,
            created_at: days_ago(30),
        },
        Student {
            id: "student-2".to_string(),
            name: "María López".to_string(),
            email: "maria@example.com".to_string(),
            phone: "623456789".to_string(),
            birth_date: "1985-08-22".to_string(),
            level: Level::Beginner,
            experience: Experience::LessThanYear,
            preferred_days: vec!["Martes".to_string(), "Jueves".to_string()],
            preferred_time: "Mañana".to_string(),
            comments: None,
            status: StudentStatus::Pending,
            created_at: days_ago(15),
        },
        Student {
            id: "student-3".to_string(),
            name: "Carlos Gómez".to_string(),
            email: "carlos@example.com".to_string(),
            phone: "634567890".to_string(),
            birth_date: "1992-11-10".to_string(),
            level: Level::Advanced,
            experience: Experience::MoreThanThreeYears,
            preferred_days: vec!["Sábado".to_string(), "Domingo".to_string()],
            preferred_time: "Mañana".to_string(),
            comments: None,
            status: StudentStatus::Pending,
            created_at: days_ago(5),
        },
    ]
}

pub(crate) fn events() -> Vec<Event> {
    vec![
        Event {
            id: "event-1".to_string(),
            title: "Torneo de Primavera".to_string(),
            image: "/images/torneo1.png".to_string(),
            date: "2023-05-15".to_string(),
            time: "09:00 - 18:00".to_string(),
            location: "PádelPro Academy".to_string(),
            kind: EventType::Tournament,
            category: "Mixto - Todas las categorías".to_string(),
            participants: "32 parejas".to_string(),
            price: "40€ por pareja".to_string(),
            description: "Nuestro tradicional torneo de primavera con categorías para todos \
                          los niveles. Incluye comida, bebida y premios para los ganadores."
                .to_string(),
            registration_deadline: "2023-05-10".to_string(),
            registrations: Vec::new(),
            created_at: days_ago(20),
        },
        Event {
            id: "event-2".to_string(),
            title: "Clinic de Técnica Avanzada".to_string(),
            image: "/images/torneo2.png".to_string(),
            date: "2023-05-22".to_string(),
            time: "10:00 - 13:00".to_string(),
            location: "PádelPro Academy".to_string(),
            kind: EventType::Clinic,
            category: "Nivel Intermedio-Avanzado".to_string(),
            participants: "16 personas máximo".to_string(),
            price: "45€ por persona".to_string(),
            description: "Clinic especializado en técnicas avanzadas de remate y volea. \
                          Impartido por nuestro entrenador principal Carlos Rodríguez."
                .to_string(),
            registration_deadline: "2023-05-20".to_string(),
            registrations: Vec::new(),
            created_at: days_ago(10),
        },
    ]
}

pub(crate) fn bookings() -> Vec<Booking> {
    vec![
        Booking {
            id: "booking-1".to_string(),
            student_id: "student-1".to_string(),
            student_name: "Pedro Sánchez".to_string(),
            teacher_id: "teacher-1".to_string(),
            teacher_name: "Carlos Rodríguez".to_string(),
            date: "2023-05-15".to_string(),
            time: "10:00 - 11:00".to_string(),
            court: "Pista 1".to_string(),
            kind: BookingType::Individual,
            status: BookingStatus::Confirmed,
            created_at: days_ago(5),
        },
        Booking {
            id: "booking-2".to_string(),
            student_id: "student-2".to_string(),
            student_name: "María López".to_string(),
            teacher_id: "teacher-2".to_string(),
            teacher_name: "Ana Martínez".to_string(),
            date: "2023-05-16".to_string(),
            time: "17:00 - 18:00".to_string(),
            court: "Pista 2".to_string(),
            kind: BookingType::Group,
            status: BookingStatus::Pending,
            created_at: days_ago(2),
        },
    ]
}

pub(crate) fn messages() -> Vec<ContactMessage> {
    vec![
        ContactMessage {
            id: "message-1".to_string(),
            name: "Juan Pérez".to_string(),
            email: "juan@example.com".to_string(),
            phone: "612345678".to_string(),
            subject: MessageSubject::Info,
            message: "Me gustaría recibir más información sobre las clases para principiantes."
                .to_string(),
            read: true,
            replied: false,
            created_at: days_ago(3),
        },
        ContactMessage {
            id: "message-2".to_string(),
            name: "Laura García".to_string(),
            email: "laura@example.com".to_string(),
            phone: "623456789".to_string(),
            subject: MessageSubject::Events,
            message: "¿Cuándo será el próximo torneo? Me gustaría participar.".to_string(),
            read: false,
            replied: false,
            created_at: days_ago(1),
        },
    ]
}

pub(crate) fn blogs() -> Vec<BlogPost> {
    vec![
        BlogPost {
            id: "blog-1".to_string(),
            title: "Mejora tu técnica de revés".to_string(),
            excerpt: "Consejos prácticos para perfeccionar uno de los golpes más importantes \
                      en el pádel."
                .to_string(),
            content: "# Mejora tu técnica de revés\n\nEl revés es uno de los golpes \
                      fundamentales en el pádel.\n\n## Posición básica\n\n- Colócate de lado, \
                      con el hombro apuntando hacia la pared.\n- Flexiona ligeramente las \
                      rodillas.\n- Sujeta la pala con un agarre continental.\n\nCon práctica \
                      constante notarás una mejora significativa en tu revés."
                .to_string(),
            author: "Carlos Rodríguez".to_string(),
            date: "2023-06-05".to_string(),
            image: "/images/blog1.png".to_string(),
            published: true,
        },
        BlogPost {
            id: "blog-2".to_string(),
            title: "Preparación física específica".to_string(),
            excerpt: "Ejercicios diseñados para mejorar tu rendimiento en la pista de pádel."
                .to_string(),
            content: "# Preparación física específica para pádel\n\nUna buena preparación \
                      física es fundamental para rendir al máximo y prevenir lesiones.\n\n\
                      ## Ejercicios de resistencia\n\n- Intervalos de alta intensidad.\n- \
                      Carrera continua a ritmo moderado.\n\n## Ejercicios de agilidad\n\n- \
                      Escalera de agilidad.\n- Desplazamientos laterales."
                .to_string(),
            author: "Laura Martínez".to_string(),
            date: "2023-06-02".to_string(),
            image: "/images/blog2.png".to_string(),
            published: true,
        },
        BlogPost {
            id: "blog-3".to_string(),
            title: "Guía de compra: Palas 2023".to_string(),
            excerpt: "Análisis de las mejores palas del mercado para cada tipo de jugador."
                .to_string(),
            content: "# Guía de compra: Las mejores palas de pádel 2023\n\nElegir la pala \
                      adecuada puede marcar una gran diferencia en tu juego.\n\n## Formas\n\n\
                      - **Redonda**: control, para principiantes.\n- **Diamante**: potencia, \
                      para avanzados.\n- **Lágrima**: equilibrio entre ambas.\n\nPrueba la \
                      pala antes de comprarla siempre que sea posible."
                .to_string(),
            author: "Javier López".to_string(),
            date: "2023-05-28".to_string(),
            image: "/images/blog3.png".to_string(),
            published: false,
        },
    ]
}
